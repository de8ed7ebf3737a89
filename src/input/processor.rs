//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys) and the key-binding map.  It is the only
//! thing that sits between raw window/DOM events and the engine's
//! [`execute`](crate::BoxEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::command::BoxCommand;

/// Maps physical key strings to [`BoxCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format, which is
/// also what the DOM reports as `KeyboardEvent.code`: `"KeyF"`, `"Equal"`,
/// `"BracketLeft"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`BoxCommand`] that can be
/// key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Fly the camera in front of the box.
    MoveFront,
    /// Fly the camera to the left of the box.
    MoveLeft,
    /// Grow the width by one nudge step.
    Widen,
    /// Shrink the width by one nudge step.
    Narrow,
    /// Grow the depth by one nudge step.
    Deepen,
    /// Shrink the depth by one nudge step.
    Shallow,
    /// Return the camera to its start position.
    ResetCamera,
}

impl KeyCommandTag {
    /// Convert to the corresponding [`BoxCommand`].
    fn to_command(self) -> BoxCommand {
        match self {
            Self::MoveFront => BoxCommand::MoveFront,
            Self::MoveLeft => BoxCommand::MoveLeft,
            Self::Widen => BoxCommand::NudgeDimensions {
                width: 1.0,
                depth: 0.0,
            },
            Self::Narrow => BoxCommand::NudgeDimensions {
                width: -1.0,
                depth: 0.0,
            },
            Self::Deepen => BoxCommand::NudgeDimensions {
                width: 0.0,
                depth: 1.0,
            },
            Self::Shallow => BoxCommand::NudgeDimensions {
                width: 0.0,
                depth: -1.0,
            },
            Self::ResetCamera => BoxCommand::ResetCamera,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyF".into(), KeyCommandTag::MoveFront),
            ("KeyL".into(), KeyCommandTag::MoveLeft),
            ("Equal".into(), KeyCommandTag::Widen),
            ("Minus".into(), KeyCommandTag::Narrow),
            ("BracketRight".into(), KeyCommandTag::Deepen),
            ("BracketLeft".into(), KeyCommandTag::Shallow),
            ("KeyR".into(), KeyCommandTag::ResetCamera),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<BoxCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`BoxCommand`]s.
///
/// Left drag rotates, right drag (or shift + left drag) pans, the wheel
/// zooms. Key presses go through [`KeyBindings`].
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = input_processor.handle_key_press("KeyF") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    last_cursor: Option<Vec2>,
    /// Button currently dragging, if any.
    held_button: Option<MouseButton>,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            last_cursor: None,
            held_button: None,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Whether a drag button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.held_button.is_some()
    }

    /// Replace the key bindings (after an options reload).
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<BoxCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<BoxCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    if button.drags() {
                        self.held_button = Some(button);
                    }
                } else if self.held_button == Some(button) {
                    self.held_button = None;
                }
                None
            }
            InputEvent::Scroll { delta } => Some(BoxCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved: compute delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<BoxCommand> {
        let pos = Vec2::new(x, y);
        let delta = self.last_cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.last_cursor = Some(pos);

        if delta == Vec2::ZERO {
            return None;
        }
        match self.held_button? {
            MouseButton::Left if !self.shift_pressed => {
                Some(BoxCommand::RotateCamera { delta })
            }
            _ => Some(BoxCommand::PanCamera { delta }),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, button: MouseButton, pressed: bool) {
        assert_eq!(
            p.handle_event(InputEvent::MouseButton { button, pressed }),
            None
        );
    }

    #[test]
    fn hover_without_button_produces_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }),
            None
        );
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 30.0, y: 15.0 }),
            None
        );
    }

    #[test]
    fn left_drag_rotates_and_shift_drag_pans() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        press(&mut p, MouseButton::Left, true);
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 5.0, y: -2.0 }),
            Some(BoxCommand::RotateCamera {
                delta: Vec2::new(5.0, -2.0)
            })
        );

        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: true });
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 6.0, y: -2.0 }),
            Some(BoxCommand::PanCamera {
                delta: Vec2::new(1.0, 0.0)
            })
        );

        press(&mut p, MouseButton::Left, false);
        assert!(!p.is_dragging());
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 9.0, y: 9.0 }),
            None
        );
    }

    #[test]
    fn right_drag_pans() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        press(&mut p, MouseButton::Right, true);
        assert!(matches!(
            p.handle_event(InputEvent::CursorMoved { x: 4.0, y: 1.0 }),
            Some(BoxCommand::PanCamera { .. })
        ));
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(BoxCommand::Zoom { delta: 1.5 })
        );
    }

    #[test]
    fn default_key_bindings_resolve() {
        let p = InputProcessor::new();
        assert_eq!(p.handle_key_press("KeyF"), Some(BoxCommand::MoveFront));
        assert_eq!(p.handle_key_press("KeyL"), Some(BoxCommand::MoveLeft));
        assert_eq!(
            p.handle_key_press("Minus"),
            Some(BoxCommand::NudgeDimensions {
                width: -1.0,
                depth: 0.0
            })
        );
        assert_eq!(
            p.handle_key_press("BracketRight"),
            Some(BoxCommand::NudgeDimensions {
                width: 0.0,
                depth: 1.0
            })
        );
        assert_eq!(p.handle_key_press("KeyR"), Some(BoxCommand::ResetCamera));
        assert_eq!(p.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn rebinding_a_key_replaces_it() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyF", KeyCommandTag::MoveLeft);
        let p = InputProcessor::with_key_bindings(bindings);
        assert_eq!(p.handle_key_press("KeyF"), Some(BoxCommand::MoveLeft));
    }

    #[test]
    fn key_bindings_deserialize_from_toml() {
        let bindings: KeyBindings = toml::from_str(
            "[bindings]\nSpace = 'move_front'\nKeyA = 'move_left'\n",
        )
        .unwrap();
        assert_eq!(bindings.lookup("Space"), Some(BoxCommand::MoveFront));
        assert_eq!(bindings.lookup("KeyF"), None);
    }
}
