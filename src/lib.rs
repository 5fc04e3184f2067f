#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod stroke;
pub mod util;

pub use app::StoryCanvasApp;
pub use canvas::CanvasState;
pub use command::CanvasCommand;
pub use config::CanvasConfig;
pub use history::{RedoPolicy, StrokeHistory};
pub use input::{InputEvent, InputLocation, InputTracker, ToolSettings};
pub use renderer::{Renderer, Scene, Segment};
pub use session::{SessionGuard, UsageLimit};
pub use stroke::{ActiveStroke, BrushKind, ShapeKind, Stroke, StrokeKind};
