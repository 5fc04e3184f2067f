//! Canvas-space geometry: inset clamping and shape outlines.

pub mod shapes;

use egui::{Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};

/// Space reserved along each edge of the view for fixed tool strips.
///
/// Pointer positions are clamped to the view rectangle shrunk by these insets
/// before they reach a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CanvasInsets {
    /// The drawable rectangle inside `view`.
    ///
    /// If the insets are wider or taller than the view, that axis collapses
    /// onto its minimum so clamping still has a valid range.
    pub fn inner_rect(&self, view: Rect) -> Rect {
        let min = pos2(view.min.x + self.left, view.min.y + self.top);
        let max = pos2(
            (view.max.x - self.right).max(min.x),
            (view.max.y - self.bottom).max(min.y),
        );
        Rect::from_min_max(min, max)
    }
}

/// Clamp a point into `bounds`. `bounds` must not be inverted.
pub fn clamp_to(bounds: Rect, point: Pos2) -> Pos2 {
    pos2(
        point.x.clamp(bounds.min.x, bounds.max.x),
        point.y.clamp(bounds.min.y, bounds.max.y),
    )
}

/// Rotation of the segment `from -> to`, in radians.
pub fn segment_angle(from: Pos2, to: Pos2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
