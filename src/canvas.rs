use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::history::{RedoPolicy, StrokeHistory};
use crate::renderer::background::BackgroundPattern;
use crate::stroke::{ActiveStroke, Stroke};

/// Everything the drawing surface knows about the current picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    history: StrokeHistory,
    // Gestures never survive a restart
    #[serde(skip)]
    active: Option<ActiveStroke>,
    #[serde(with = "crate::color::hex")]
    background_color: Color32,
    background_pattern: BackgroundPattern,
    pattern_seed: u64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(Color32::WHITE, RedoPolicy::default())
    }
}

impl CanvasState {
    pub fn new(background_color: Color32, policy: RedoPolicy) -> Self {
        Self {
            history: StrokeHistory::new(policy),
            active: None,
            background_color,
            background_pattern: BackgroundPattern::None,
            pattern_seed: 0,
        }
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut StrokeHistory {
        &mut self.history
    }

    /// Committed strokes in z-order, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    pub fn active_stroke(&self) -> Option<&ActiveStroke> {
        self.active.as_ref()
    }

    pub fn set_active_stroke(&mut self, stroke: Option<ActiveStroke>) {
        self.active = stroke;
    }

    pub fn active_stroke_mut(&mut self) -> Option<&mut ActiveStroke> {
        self.active.as_mut()
    }

    pub fn take_active_stroke(&mut self) -> Option<ActiveStroke> {
        self.active.take()
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
    }

    pub fn background_pattern(&self) -> BackgroundPattern {
        self.background_pattern
    }

    /// Switch pattern. Picking a different pattern rolls a new placement seed,
    /// so re-renders of the same pattern stay put.
    pub fn set_background_pattern(&mut self, pattern: BackgroundPattern) {
        if pattern != self.background_pattern {
            self.background_pattern = pattern;
            self.pattern_seed = rand::random();
        }
    }

    pub fn pattern_seed(&self) -> u64 {
        self.pattern_seed
    }
}
