//! Input dispatch for [`WormholeEngine`].

use super::WormholeEngine;
use crate::input::{InputEvent, OrbitCommand};

impl WormholeEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Pointer drags orbit the camera around its look-at target and the
    /// wheel dollies it. Returns `true` if the event produced a camera
    /// command.
    ///
    /// ```ignore
    /// let _ = engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.input.handle_event(event).is_some_and(|command| {
            self.execute(command);
            true
        })
    }

    /// Apply an orbit command. The camera eases toward it over the next
    /// frames when damping is enabled.
    pub fn execute(&mut self, command: OrbitCommand) {
        match command {
            OrbitCommand::Rotate { delta } => {
                self.camera_controller.rotate(delta);
            }
            OrbitCommand::Zoom { delta } => {
                self.camera_controller.zoom(delta);
            }
        }
    }
}
