/// Pointer input in a form both hosts can produce.
///
/// The winit viewer translates window events and the browser entry point
/// translates DOM mouse events; [`InputProcessor`](super::InputProcessor)
/// turns the stream into [`BoxCommand`](crate::BoxCommand)s. Positions are
/// in physical pixels so drag deltas match the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// A pointer button changed state.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// `true` on press.
        pressed: bool,
    },
    /// Wheel notches; positive moves the camera toward its target.
    Scroll {
        /// Notches scrolled.
        delta: f32,
    },
    /// Shift was pressed or released (shift + left drag pans).
    ModifiersChanged {
        /// Shift held.
        shift: bool,
    },
}

/// Pointer button, reduced to what the orbit controls distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotates the orbit.
    Left,
    /// Pans the orbit target.
    Right,
    /// Wheel click; no drag action.
    Middle,
    /// Back, forward and any extra buttons; ignored.
    Other,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom_button(code: i16) -> Self {
        match code {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Other,
        }
    }

    /// Whether holding this button drags the camera.
    #[must_use]
    pub fn drags(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_codes() {
        assert_eq!(MouseButton::from_dom_button(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom_button(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_dom_button(2), MouseButton::Right);
        assert_eq!(MouseButton::from_dom_button(3), MouseButton::Other);
    }

    #[test]
    fn only_left_and_right_drag() {
        assert!(MouseButton::Left.drags());
        assert!(MouseButton::Right.drags());
        assert!(!MouseButton::Middle.drags());
        assert!(!MouseButton::Other.drags());
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn winit_back_button_is_other() {
        assert_eq!(
            MouseButton::from(winit::event::MouseButton::Back),
            MouseButton::Other
        );
    }
}
