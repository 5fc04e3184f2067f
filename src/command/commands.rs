use egui::Color32;
use log::{debug, info};

use crate::canvas::CanvasState;
use crate::renderer::background::BackgroundPattern;
use crate::stroke::Stroke;

/// Everything that can change a [`CanvasState`] outside of an in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    /// Append a finished stroke to the drawing
    AddStroke(Stroke),
    Undo,
    Redo,
    /// Wipe the drawing. Confirmation is the caller's job.
    Clear,
    SetBackgroundColor(Color32),
    SetBackgroundPattern(BackgroundPattern),
}

impl CanvasCommand {
    /// Apply the command. Returns `false` when nothing changed, e.g. undo with
    /// an empty history.
    pub fn execute(self, canvas: &mut CanvasState) -> bool {
        match self {
            Self::AddStroke(stroke) => {
                info!(
                    "Committing {} stroke with {} points",
                    stroke.kind().label(),
                    stroke.points().len()
                );
                canvas.history_mut().commit(stroke);
                true
            }
            Self::Undo => match canvas.history_mut().undo() {
                Some(stroke) => {
                    info!("Undo {} stroke", stroke.kind().label());
                    true
                }
                None => {
                    debug!("Nothing to undo");
                    false
                }
            },
            Self::Redo => match canvas.history_mut().redo() {
                Some(stroke) => {
                    info!("Redo {} stroke", stroke.kind().label());
                    true
                }
                None => {
                    debug!("Nothing to redo");
                    false
                }
            },
            Self::Clear => {
                let had_strokes = !canvas.history().is_empty();
                info!("Clearing {} strokes", canvas.history().len());
                canvas.history_mut().clear();
                had_strokes
            }
            Self::SetBackgroundColor(color) => {
                let changed = canvas.background_color() != color;
                canvas.set_background_color(color);
                changed
            }
            Self::SetBackgroundPattern(pattern) => {
                let changed = canvas.background_pattern() != pattern;
                if changed {
                    info!("Background pattern set to {}", pattern.label());
                }
                canvas.set_background_pattern(pattern);
                changed
            }
        }
    }
}
