#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use story_canvas::{CanvasConfig, StoryCanvasApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = CanvasConfig::from_env().unwrap_or_else(|err| {
        log::error!("{err}; falling back to the default config");
        CanvasConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Story Canvas")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Story Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(StoryCanvasApp::new(cc, config)))),
    )
}
