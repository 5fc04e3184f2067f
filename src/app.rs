use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasState;
use crate::command::CanvasCommand;
use crate::config::CanvasConfig;
use crate::export::{self, DrawingRecord};
use crate::input::{InputEvent, InputHandler, InputTracker, Shortcut, ToolSettings};
use crate::panels;
use crate::renderer::{Renderer, Scene};
use crate::session::{SessionBudget, SessionGuard};

/// The part of the app that survives a restart.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedState {
    canvas: CanvasState,
    tool: Option<ToolSettings>,
}

pub struct StoryCanvasApp {
    config: CanvasConfig,
    canvas: CanvasState,
    tracker: InputTracker,
    input: InputHandler,
    renderer: Renderer,
    session: Option<SessionGuard>,
    canvas_size: Vec2,
    drawing_name: String,
    confirm_clear: bool,
    export_error: Option<String>,
    last_saved: Option<String>,
    last_record: Option<DrawingRecord>,
}

impl StoryCanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        let persisted: Option<PersistedState> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));

        let mut app = Self::with_config(config);
        if let Some(persisted) = persisted {
            info!(
                "Restored canvas with {} strokes",
                persisted.canvas.strokes().len()
            );
            app.canvas = persisted.canvas;
            app.canvas.history_mut().set_policy(app.config.redo_policy);
            if let Some(tool) = persisted.tool {
                *app.tracker.settings_mut() = tool;
            }
        }

        app.start_session(&cc.egui_ctx);
        app
    }

    /// App without a window: no persisted state, no session guard.
    pub fn with_config(config: CanvasConfig) -> Self {
        let tool = ToolSettings {
            color: config.palette.first().copied().unwrap_or(egui::Color32::BLACK),
            size: config.default_size(),
            opacity: config.default_opacity,
            ..Default::default()
        };

        Self {
            canvas: CanvasState::new(config.background_color, config.redo_policy),
            tracker: InputTracker::new(tool, config.insets, Rect::ZERO),
            input: InputHandler::new(Rect::ZERO),
            renderer: Renderer::new(config.spray_opacity),
            session: None,
            canvas_size: Vec2::ZERO,
            drawing_name: String::new(),
            confirm_clear: false,
            export_error: None,
            last_saved: None,
            last_record: None,
            config,
        }
    }

    fn start_session(&mut self, ctx: &egui::Context) {
        let Some(limit) = self.config.session.session_limit() else {
            return;
        };

        let ctx = ctx.clone();
        match SessionGuard::start(
            Arc::new(SessionBudget::new(limit)),
            self.config.session.poll_interval(),
            move || ctx.request_repaint(),
        ) {
            Ok(guard) => self.session = Some(guard),
            Err(err) => warn!("Drawing without a time limit: {err}"),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        self.tracker.settings()
    }

    pub fn tool_settings_mut(&mut self) -> &mut ToolSettings {
        self.tracker.settings_mut()
    }

    /// Size of the canvas as of the last frame.
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn drawing_name_mut(&mut self) -> &mut String {
        &mut self.drawing_name
    }

    pub fn last_saved(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    /// Record of the most recent save, ready for the document store.
    pub fn last_record(&self) -> Option<&DrawingRecord> {
        self.last_record.as_ref()
    }

    /// Drawable area in canvas-local coordinates.
    pub fn drawable_rect(&self) -> Rect {
        self.tracker.bounds()
    }

    pub fn execute(&mut self, command: CanvasCommand) -> bool {
        command.execute(&mut self.canvas)
    }

    pub fn session_expired(&self) -> bool {
        self.session.as_ref().is_some_and(SessionGuard::limit_reached)
    }

    /// Ask before wiping the drawing.
    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    pub fn scene(&self, size: Vec2) -> Scene {
        self.renderer.build_scene(&self.canvas, size)
    }

    fn set_canvas_rect(&mut self, rect: Rect) {
        self.input.set_canvas_rect(rect);
        self.canvas_size = rect.size();
        self.tracker
            .set_view_rect(Rect::from_min_size(Pos2::ZERO, rect.size()));
    }

    /// Route this frame's input for the canvas widget behind `canvas`.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        self.set_canvas_rect(canvas.rect);

        let typing = ctx.wants_keyboard_input();
        for event in self.input.process_input(ctx, canvas.contains_pointer()) {
            self.handle_event(&event, typing);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, typing: bool) {
        let command = match event {
            InputEvent::Shortcut(_) if typing => None,
            InputEvent::Shortcut(Shortcut::Undo) => Some(CanvasCommand::Undo),
            InputEvent::Shortcut(Shortcut::Redo) => Some(CanvasCommand::Redo),
            pointer => self.tracker.handle_event(pointer, &mut self.canvas),
        };
        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Write the current picture into the export directory.
    pub fn save_drawing(&mut self, size: Vec2) {
        let name = if self.drawing_name.trim().is_empty() {
            "drawing"
        } else {
            self.drawing_name.trim()
        };
        let scene = self.scene(size);
        let target = &self.config.export;
        match export::save_drawing(&scene, &target.directory, name, &target.owner_id) {
            Ok(saved) => {
                self.last_saved = Some(saved.path.display().to_string());
                self.last_record = Some(saved.record);
                self.export_error = None;
            }
            Err(err) => {
                warn!("Saving drawing failed: {err}");
                self.export_error = Some(err.to_string());
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if self.confirm_clear {
            egui::Window::new("Clear drawing?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label("This removes every stroke on the canvas.");
                    ui.horizontal(|ui| {
                        if ui.button("Clear").clicked() {
                            self.execute(CanvasCommand::Clear);
                            self.confirm_clear = false;
                        }
                        if ui.button("Keep drawing").clicked() {
                            self.confirm_clear = false;
                        }
                    });
                });
        }

        if let Some(message) = self.export_error.clone() {
            egui::Window::new("Could not save")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.export_error = None;
                    }
                });
        }
    }

    fn show_time_up(&mut self, ctx: &egui::Context) {
        if self.canvas.active_stroke().is_some() {
            self.canvas.set_active_stroke(None);
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.heading("Time's up for today!");
                ui.label("Your drawing is kept safe until next time.");
            });
        });
    }
}

impl eframe::App for StoryCanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            canvas: self.canvas.clone(),
            tool: Some(*self.tracker.settings()),
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session_expired() {
            self.show_time_up(ctx);
            return;
        }

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.show_dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputLocation, PointerSnapshot};
    use egui::pos2;

    fn location(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: pos2(x, y),
            is_in_canvas: true,
        }
    }

    fn app() -> StoryCanvasApp {
        let mut app = StoryCanvasApp::with_config(CanvasConfig::default());
        app.set_canvas_rect(Rect::from_min_size(pos2(200.0, 0.0), egui::vec2(400.0, 300.0)));
        app
    }

    fn pointer(app: &mut StoryCanvasApp, snapshot: PointerSnapshot) {
        for event in app.input.process_pointer(snapshot) {
            app.handle_event(&event, false);
        }
    }

    fn drag(app: &mut StoryCanvasApp, canvas_on_top: bool) {
        let at = |x: f32, pressed: bool, released: bool| PointerSnapshot {
            pos: Some(pos2(x, 150.0)),
            pressed,
            released,
            canvas_on_top,
        };
        pointer(app, at(400.0, true, false));
        pointer(app, at(405.0, false, false));
        pointer(app, at(405.0, false, true));
    }

    #[test]
    fn gesture_events_commit_a_stroke() {
        let mut app = app();
        app.handle_event(&InputEvent::PointerDown { location: location(10.0, 10.0) }, false);
        app.handle_event(&InputEvent::PointerMove { location: location(20.0, 20.0) }, false);
        app.handle_event(&InputEvent::PointerUp { location: location(20.0, 20.0) }, false);
        assert_eq!(app.canvas().strokes().len(), 1);

        app.handle_event(&InputEvent::Shortcut(Shortcut::Undo), false);
        assert!(app.canvas().strokes().is_empty());
        app.handle_event(&InputEvent::Shortcut(Shortcut::Redo), false);
        assert_eq!(app.canvas().strokes().len(), 1);
    }

    #[test]
    fn shortcuts_are_ignored_while_typing() {
        let mut app = app();
        app.handle_event(&InputEvent::PointerDown { location: location(10.0, 10.0) }, false);
        app.handle_event(&InputEvent::PointerMove { location: location(20.0, 20.0) }, false);
        app.handle_event(&InputEvent::PointerUp { location: location(20.0, 20.0) }, false);

        app.handle_event(&InputEvent::Shortcut(Shortcut::Undo), true);
        assert_eq!(app.canvas().strokes().len(), 1);
    }

    #[test]
    fn drag_on_the_canvas_draws() {
        let mut app = app();
        drag(&mut app, true);
        assert_eq!(app.canvas().strokes().len(), 1);
    }

    #[test]
    fn drag_on_the_clear_dialog_leaves_the_drawing_alone() {
        let mut app = app();
        drag(&mut app, true);
        app.request_clear();

        // the dialog window sits over the middle of the canvas
        drag(&mut app, false);

        assert_eq!(app.canvas().strokes().len(), 1);
        assert!(app.canvas().active_stroke().is_none());
    }

    #[test]
    fn default_canvas_is_drawable_edge_to_edge() {
        let app = app();
        assert_eq!(
            app.drawable_rect(),
            Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 300.0))
        );
    }

    #[test]
    fn save_hands_off_a_record_for_the_configured_owner() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CanvasConfig::default();
        config.export.directory = dir.path().to_path_buf();
        config.export.owner_id = "kid-7".to_owned();
        let mut app = StoryCanvasApp::with_config(config);
        app.drawing_name_mut().push_str("Rocket");

        app.save_drawing(egui::vec2(40.0, 30.0));

        let record = app.last_record().unwrap();
        assert_eq!(record.owner_id, "kid-7");
        assert_eq!(record.name, "Rocket");
        assert!(app.last_saved().is_some());
        assert!(app.export_error.is_none());
    }

    #[test]
    fn new_app_starts_with_config_defaults() {
        let app = app();
        let config = CanvasConfig::default();
        assert_eq!(app.tool_settings().size, config.default_size());
        assert_eq!(app.canvas().background_color(), config.background_color);
        assert!(!app.session_expired());
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let mut config = CanvasConfig::default();
        config.export.directory = blocker;
        let mut app = StoryCanvasApp::with_config(config);
        app.save_drawing(egui::vec2(50.0, 50.0));
        assert!(app.export_error.is_some());
        assert!(app.last_saved().is_none());
        assert!(app.last_record().is_none());
    }
}
