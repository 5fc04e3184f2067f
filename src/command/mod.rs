mod commands;

pub use commands::CanvasCommand;
