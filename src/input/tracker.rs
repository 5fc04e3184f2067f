use egui::{Color32, Pos2, Rect};
use log::debug;
use serde::{Deserialize, Serialize};

use super::InputEvent;
use crate::canvas::CanvasState;
use crate::command::CanvasCommand;
use crate::geometry::shapes::shape_points;
use crate::geometry::{CanvasInsets, clamp_to};
use crate::stroke::{ActiveStroke, StrokeKind};

/// What the next gesture will draw with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub kind: StrokeKind,
    #[serde(with = "crate::color::hex")]
    pub color: Color32,
    pub size: f32,
    pub opacity: f32,
    /// Paint with the canvas background color instead of `color`
    pub eraser: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            kind: StrokeKind::default(),
            color: Color32::BLACK,
            size: 5.0,
            opacity: 1.0,
            eraser: false,
        }
    }
}

/// Turns pointer gestures into strokes.
///
/// The in-progress stroke lives on the [`CanvasState`] so the renderer can show
/// it; the tracker only remembers the shape anchor.
#[derive(Debug, Clone)]
pub struct InputTracker {
    settings: ToolSettings,
    insets: CanvasInsets,
    bounds: Rect,
    anchor: Option<Pos2>,
}

impl InputTracker {
    /// `view` is the canvas rectangle in canvas-local coordinates.
    pub fn new(settings: ToolSettings, insets: CanvasInsets, view: Rect) -> Self {
        Self {
            settings,
            insets,
            bounds: insets.inner_rect(view),
            anchor: None,
        }
    }

    pub fn set_view_rect(&mut self, view: Rect) {
        self.bounds = self.insets.inner_rect(view);
    }

    /// The rectangle every tracked point is clamped into.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn clamp(&self, raw: Pos2) -> Pos2 {
        clamp_to(self.bounds, raw)
    }

    /// Feed one input event. Returns a command when a gesture completes.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        canvas: &mut CanvasState,
    ) -> Option<CanvasCommand> {
        match event {
            InputEvent::PointerDown { location } => self.begin(location.position, canvas),
            InputEvent::PointerMove { location } => {
                self.update(location.position, canvas);
                None
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => self.end(canvas),
            InputEvent::Shortcut(_) => None,
        }
    }

    /// Start a gesture. A gesture still in flight is finished first, and its
    /// command returned.
    pub fn begin(&mut self, raw: Pos2, canvas: &mut CanvasState) -> Option<CanvasCommand> {
        let previous = if canvas.active_stroke().is_some() {
            self.end(canvas)
        } else {
            None
        };

        let point = self.clamp(raw);
        let settings = self.settings;
        let color = if settings.eraser {
            canvas.background_color()
        } else {
            settings.color
        };

        let mut stroke = ActiveStroke::new(color, settings.size, settings.kind, settings.opacity);
        stroke.add_point(point);
        if settings.kind.is_shape() {
            self.anchor = Some(point);
        }
        debug!("Gesture started at {point:?} with {}", settings.kind.label());
        canvas.set_active_stroke(Some(stroke));

        previous
    }

    /// Extend a freehand stroke, or rebuild a shape from its anchor.
    pub fn update(&mut self, raw: Pos2, canvas: &mut CanvasState) {
        let point = self.clamp(raw);
        let Some(stroke) = canvas.active_stroke_mut() else {
            return;
        };

        match (stroke.kind(), self.anchor) {
            (StrokeKind::Brush(_), _) => stroke.add_point(point),
            (StrokeKind::Shape(shape), Some(anchor)) => {
                stroke.set_points(shape_points(shape, anchor, point));
            }
            (StrokeKind::Shape(_), None) => {}
        }
    }

    /// Finish the gesture. Strokes with fewer than two points are dropped.
    pub fn end(&mut self, canvas: &mut CanvasState) -> Option<CanvasCommand> {
        self.anchor = None;
        let stroke = canvas.take_active_stroke()?;
        let point_count = stroke.points().len();
        match stroke.into_stroke() {
            Some(stroke) => Some(CanvasCommand::AddStroke(stroke)),
            None => {
                debug!("Discarding gesture with {point_count} point(s)");
                None
            }
        }
    }
}
