//! Runtime configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants to
//! change. The file is JSON and is located through [`CONFIG_ENV_VAR`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use egui::Color32;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::CanvasInsets;
use crate::history::RedoPolicy;
use crate::stroke::DEFAULT_SPRAY_OPACITY;

pub const CONFIG_ENV_VAR: &str = "STORY_CANVAS_CONFIG";

/// Longest allowed wait between two usage-limit checks.
pub const MAX_POLL_INTERVAL_SECS: u64 = 60 * 60;
/// Longest drawing session that can be configured.
pub const MAX_SESSION_LIMIT_MINUTES: u64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Strips along the canvas edges that strokes may not enter
    pub insets: CanvasInsets,
    #[serde(with = "crate::color::hex_list")]
    pub palette: Vec<Color32>,
    pub size_presets: Vec<f32>,
    pub default_opacity: f32,
    pub spray_opacity: f32,
    #[serde(with = "crate::color::hex")]
    pub background_color: Color32,
    pub redo_policy: RedoPolicy,
    pub session: SessionConfig,
    pub export: ExportConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            insets: CanvasInsets::default(),
            palette: vec![
                Color32::from_rgb(0x00, 0x00, 0x00),
                Color32::from_rgb(0xff, 0x3b, 0x30),
                Color32::from_rgb(0xff, 0x95, 0x00),
                Color32::from_rgb(0xff, 0xcc, 0x00),
                Color32::from_rgb(0x34, 0xc7, 0x59),
                Color32::from_rgb(0x00, 0x7a, 0xff),
                Color32::from_rgb(0x58, 0x56, 0xd6),
                Color32::from_rgb(0xff, 0x2d, 0x55),
                Color32::from_rgb(0xa2, 0x84, 0x5e),
                Color32::from_rgb(0x8e, 0x8e, 0x93),
            ],
            size_presets: vec![2.0, 5.0, 10.0, 20.0],
            default_opacity: 1.0,
            spray_opacity: DEFAULT_SPRAY_OPACITY,
            background_color: Color32::WHITE,
            redo_policy: RedoPolicy::default(),
            session: SessionConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub poll_interval_secs: u64,
    /// Drawing time allowed per app launch; `None` disables the limit
    pub session_limit_minutes: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            session_limit_minutes: None,
        }
    }
}

impl SessionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn session_limit(&self) -> Option<Duration> {
        self.session_limit_minutes
            .map(|m| Duration::from_secs(m.saturating_mul(60)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
    /// Tagged onto exported drawings
    pub owner_id: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("drawings"),
            owner_id: "local".to_owned(),
        }
    }
}

impl CanvasConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                info!("{CONFIG_ENV_VAR} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        if self.size_presets.is_empty() {
            return Err(ConfigError::Invalid("size_presets must not be empty".into()));
        }
        if let Some(size) = self.size_presets.iter().find(|s| !(**s > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "size presets must be positive, got {size}"
            )));
        }
        for (name, value) in [
            ("default_opacity", self.default_opacity),
            ("spray_opacity", self.spray_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        let insets = self.insets;
        if [insets.left, insets.top, insets.right, insets.bottom]
            .iter()
            .any(|inset| !(*inset >= 0.0))
        {
            return Err(ConfigError::Invalid("insets must not be negative".into()));
        }
        if !(1..=MAX_POLL_INTERVAL_SECS).contains(&self.session.poll_interval_secs) {
            return Err(ConfigError::Invalid(format!(
                "session.poll_interval_secs must be within [1, {MAX_POLL_INTERVAL_SECS}], got {}",
                self.session.poll_interval_secs
            )));
        }
        if let Some(minutes) = self
            .session
            .session_limit_minutes
            .filter(|m| *m > MAX_SESSION_LIMIT_MINUTES)
        {
            return Err(ConfigError::Invalid(format!(
                "session.session_limit_minutes must be at most {MAX_SESSION_LIMIT_MINUTES}, got {minutes}"
            )));
        }
        Ok(())
    }

    /// Middle preset, the one a fresh canvas starts with.
    pub fn default_size(&self) -> f32 {
        self.size_presets
            .get(self.size_presets.len() / 2)
            .copied()
            .unwrap_or(5.0)
    }
}
