use thiserror::Error;

/// A color string that is not `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color must have 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

/// Errors raised while loading or validating a [`crate::config::CanvasConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Errors raised while flattening and saving a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas size {width}x{height} cannot be exported")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors reported by a [`crate::session::UsageLimit`] source.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Usage limit source unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to spawn session poller: {0}")]
    Spawn(#[from] std::io::Error),
}
