//! Input handling: platform-agnostic event types and the input processor
//! that converts raw window or DOM events into engine commands.

/// Host-page form controls mapped to commands.
pub mod controls;
/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into engine commands.
pub mod processor;

pub use controls::PageControl;
pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
