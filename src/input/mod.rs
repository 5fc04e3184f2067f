use egui::{Context, Key, Pos2, Rect};

mod tracker;
pub use tracker::{InputTracker, ToolSettings};

/// Where a pointer event happened, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas' top-left corner
    pub position: Pos2,
    /// Whether the raw position was inside the canvas
    pub is_in_canvas: bool,
}

/// Keyboard shortcuts the canvas reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

/// Domain-level input events, decoupled from egui.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while the primary button is held
    PointerMove { location: InputLocation },
    /// Primary button released
    PointerUp { location: InputLocation },
    /// Pointer vanished mid-gesture (left the window, touch cancelled)
    PointerLeave { last_known_location: InputLocation },
    Shortcut(Shortcut),
}

/// One frame's worth of primary-pointer state, as egui reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Latest pointer position in screen space, if the pointer is known
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    /// No other egui area (window, popup) covers the canvas under the pointer
    pub canvas_on_top: bool,
}

/// Converts raw egui input into [`InputEvent`]s for the canvas.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    gesture_active: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            gesture_active: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: (screen_pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(screen_pos),
        }
    }

    /// Read pointer and keyboard state from egui for this frame.
    ///
    /// `canvas_on_top` comes from the canvas widget's response; presses that
    /// land on a window or popup above the canvas never start a gesture.
    pub fn process_input(&mut self, ctx: &Context, canvas_on_top: bool) -> Vec<InputEvent> {
        let (snapshot, shortcut) = ctx.input(|input| {
            let snapshot = PointerSnapshot {
                pos: input.pointer.latest_pos(),
                pressed: input.pointer.primary_pressed(),
                released: input.pointer.primary_released(),
                canvas_on_top,
            };
            let shortcut = if input.modifiers.command && input.key_pressed(Key::Z) {
                Some(if input.modifiers.shift {
                    Shortcut::Redo
                } else {
                    Shortcut::Undo
                })
            } else if input.modifiers.command && input.key_pressed(Key::Y) {
                Some(Shortcut::Redo)
            } else {
                None
            };
            (snapshot, shortcut)
        });

        let mut events = self.process_pointer(snapshot);
        if let Some(shortcut) = shortcut {
            events.push(InputEvent::Shortcut(shortcut));
        }
        events
    }

    /// Turn a pointer snapshot into gesture events.
    ///
    /// Gestures only start inside the canvas and only when nothing is drawn
    /// over it there; once started they follow the pointer anywhere until
    /// release.
    pub fn process_pointer(&mut self, snapshot: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match snapshot.pos {
            Some(pos) => {
                let starts = snapshot.pressed
                    && snapshot.canvas_on_top
                    && !self.gesture_active
                    && self.canvas_rect.contains(pos);
                if starts {
                    self.gesture_active = true;
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                    });
                } else if self.gesture_active && Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }

                if snapshot.released && self.gesture_active {
                    self.gesture_active = false;
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            }
            None => {
                if self.gesture_active {
                    self.gesture_active = false;
                    let last = self.last_pointer_pos.unwrap_or(self.canvas_rect.min);
                    events.push(InputEvent::PointerLeave {
                        last_known_location: self.make_location(last),
                    });
                }
                self.last_pointer_pos = None;
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(pos2(100.0, 50.0), pos2(500.0, 450.0)))
    }

    fn at(x: f32, y: f32) -> PointerSnapshot {
        PointerSnapshot {
            pos: Some(pos2(x, y)),
            canvas_on_top: true,
            ..Default::default()
        }
    }

    #[test]
    fn press_under_a_window_does_not_start_a_gesture() {
        let mut handler = handler();
        let covered = |snapshot: PointerSnapshot| PointerSnapshot {
            canvas_on_top: false,
            ..snapshot
        };

        let pressed = handler.process_pointer(covered(PointerSnapshot {
            pressed: true,
            ..at(300.0, 250.0)
        }));
        let moved = handler.process_pointer(covered(at(305.0, 250.0)));
        let released = handler.process_pointer(covered(PointerSnapshot {
            released: true,
            ..at(305.0, 250.0)
        }));

        assert!(pressed.is_empty());
        assert!(moved.is_empty());
        assert!(released.is_empty());
    }

    #[test]
    fn gesture_keeps_going_when_the_pointer_slides_under_a_window() {
        let mut handler = handler();
        handler.process_pointer(PointerSnapshot {
            pressed: true,
            ..at(150.0, 60.0)
        });
        let moved = handler.process_pointer(PointerSnapshot {
            canvas_on_top: false,
            ..at(300.0, 250.0)
        });
        assert!(matches!(moved.as_slice(), [InputEvent::PointerMove { .. }]));
    }

    #[test]
    fn press_inside_canvas_starts_gesture_in_local_space() {
        let mut handler = handler();
        let events = handler.process_pointer(PointerSnapshot {
            pressed: true,
            ..at(150.0, 60.0)
        });
        assert_eq!(
            events,
            vec![InputEvent::PointerDown {
                location: InputLocation {
                    position: pos2(50.0, 10.0),
                    is_in_canvas: true,
                }
            }]
        );
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let mut handler = handler();
        let events = handler.process_pointer(PointerSnapshot {
            pressed: true,
            ..at(10.0, 10.0)
        });
        assert!(events.is_empty());
        assert!(handler.process_pointer(at(20.0, 20.0)).is_empty());
    }

    #[test]
    fn moves_follow_the_pointer_until_release() {
        let mut handler = handler();
        handler.process_pointer(PointerSnapshot {
            pressed: true,
            ..at(150.0, 60.0)
        });
        let moved = handler.process_pointer(at(600.0, 60.0));
        assert!(matches!(
            moved.as_slice(),
            [InputEvent::PointerMove { location }] if !location.is_in_canvas
        ));

        // no movement, no event
        assert!(handler.process_pointer(at(600.0, 60.0)).is_empty());

        let released = handler.process_pointer(PointerSnapshot {
            released: true,
            ..at(600.0, 60.0)
        });
        assert!(matches!(released.as_slice(), [InputEvent::PointerUp { .. }]));
    }

    #[test]
    fn losing_the_pointer_mid_gesture_emits_leave() {
        let mut handler = handler();
        handler.process_pointer(PointerSnapshot {
            pressed: true,
            ..at(150.0, 60.0)
        });
        let events = handler.process_pointer(PointerSnapshot::default());
        assert_eq!(
            events,
            vec![InputEvent::PointerLeave {
                last_known_location: InputLocation {
                    position: pos2(50.0, 10.0),
                    is_in_canvas: true,
                }
            }]
        );
    }
}
