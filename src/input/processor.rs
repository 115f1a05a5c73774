//! Converts raw platform events into orbit commands.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position,
//! button held). It sits between raw window events and the engine's
//! [`execute`](crate::WormholeEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};

/// Camera manipulation produced by pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitCommand {
    /// Orbit around the look-at target by a drag of `delta` pixels.
    Rotate {
        /// Cursor movement since the last event, in physical pixels.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from the target.
    Zoom {
        /// Wheel steps.
        delta: f32,
    },
}

/// Converts raw window events into [`OrbitCommand`]s.
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
}

impl InputProcessor {
    /// Create a new processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<OrbitCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(OrbitCommand::Zoom { delta })
            }
            InputEvent::CursorLeft => {
                self.mouse_pressed = false;
                self.cursor = None;
                None
            }
        }
    }

    /// Cursor moved: rotate only while dragging.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<OrbitCommand> {
        let position = Vec2::new(x, y);
        let previous = self.cursor.replace(position)?;
        if !self.mouse_pressed {
            return None;
        }
        let delta = position - previous;
        (delta != Vec2::ZERO).then_some(OrbitCommand::Rotate { delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, pressed: bool) {
        assert!(p
            .handle_event(InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            })
            .is_none());
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut p = InputProcessor::new();
        assert!(p.handle_event(InputEvent::CursorMoved { x: 1.0, y: 1.0 }).is_none());
        assert!(p.handle_event(InputEvent::CursorMoved { x: 9.0, y: 4.0 }).is_none());
    }

    #[test]
    fn left_drag_rotates_by_cursor_delta() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        press(&mut p, true);
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 15.0, y: 7.0 }),
            Some(OrbitCommand::Rotate {
                delta: Vec2::new(5.0, -3.0)
            })
        );
        press(&mut p, false);
        assert!(p.handle_event(InputEvent::CursorMoved { x: 20.0, y: 7.0 }).is_none());
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        assert!(!p.mouse_pressed());
        assert!(p.handle_event(InputEvent::CursorMoved { x: 5.0, y: 0.0 }).is_none());
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 2.0 }),
            Some(OrbitCommand::Zoom { delta: 2.0 })
        );
        assert!(p.handle_event(InputEvent::Scroll { delta: 0.0 }).is_none());
    }

    #[test]
    fn leaving_the_window_releases_the_drag() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        press(&mut p, true);
        let _ = p.handle_event(InputEvent::CursorLeft);
        assert!(!p.mouse_pressed());
        // First move after re-entering only records the position
        assert!(p.handle_event(InputEvent::CursorMoved { x: 50.0, y: 50.0 }).is_none());
    }
}
