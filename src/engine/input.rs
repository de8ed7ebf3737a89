//! Command and input dispatch for [`BoxEngine`].

use super::command::BoxCommand;
use super::BoxEngine;
use crate::input::InputEvent;
use crate::scene::box_model::DimensionError;

impl BoxEngine {
    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] for a resize with invalid dimensions; the
    /// scene is unchanged and the error is logged.
    pub fn execute(&mut self, command: &BoxCommand) -> Result<(), DimensionError> {
        log::debug!("command: {command:?}");
        self.scene.apply(command).inspect_err(|e| {
            log::warn!("rejected {command:?}: {e}");
        })
    }

    /// Feed a platform input event through the input processor.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            let _ = self.execute(&command);
        }
    }

    /// Handle a key press (`KeyboardEvent.code` / winit `KeyCode` name).
    /// Returns `true` if the key was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(command) = self.input.handle_key_press(key) else {
            return false;
        };
        let _ = self.execute(&command);
        true
    }
}
