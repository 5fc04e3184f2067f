use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;

/// What a new commit does to strokes waiting to be redone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedoPolicy {
    /// Undone strokes survive new commits and can still be redone on top of them.
    #[default]
    Preserve,
    /// A new commit discards everything on the undo stack.
    ClearOnCommit,
}

/// Ordered stroke history with undo/redo.
///
/// `committed` is the drawing, oldest first; `undone` holds strokes taken off
/// the end of it by [`StrokeHistory::undo`], most recent last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeHistory {
    committed: Vec<Stroke>,
    undone: Vec<Stroke>,
    policy: RedoPolicy,
}

impl StrokeHistory {
    pub fn new(policy: RedoPolicy) -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            policy,
        }
    }

    pub fn commit(&mut self, stroke: Stroke) {
        self.committed.push(stroke);
        if self.policy == RedoPolicy::ClearOnCommit {
            self.undone.clear();
        }
    }

    /// Move the newest committed stroke onto the undo stack.
    pub fn undo(&mut self) -> Option<&Stroke> {
        let stroke = self.committed.pop()?;
        self.undone.push(stroke);
        self.undone.last()
    }

    /// Move the most recently undone stroke back onto the drawing.
    pub fn redo(&mut self) -> Option<&Stroke> {
        let stroke = self.undone.pop()?;
        self.committed.push(stroke);
        self.committed.last()
    }

    /// Empty the drawing. The undo stack is left alone.
    pub fn clear(&mut self) {
        self.committed.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn set_policy(&mut self, policy: RedoPolicy) {
        self.policy = policy;
    }
}
