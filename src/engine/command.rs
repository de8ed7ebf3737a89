//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation (key press, mouse gesture, DOM button or
//! programmatic call) is represented as a `BoxCommand`.  Consumers
//! construct commands and pass them to
//! [`BoxEngine::execute`](super::BoxEngine::execute).

use glam::{Vec2, Vec3};

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered:
///
/// ```ignore
/// engine.execute(&BoxCommand::MoveFront)?;
/// engine.execute(&BoxCommand::SetDimensions { width: 3.0, depth: 2.0 })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BoxCommand {
    // ── Box ─────────────────────────────────────────────────────────
    /// Resize the box and retile its faces.
    SetDimensions {
        /// New x extent.
        width: f32,
        /// New z extent.
        depth: f32,
    },

    /// Resize relative to the current size, in units of the configured
    /// nudge step.
    NudgeDimensions {
        /// Width steps (negative shrinks).
        width: f32,
        /// Depth steps (negative shrinks).
        depth: f32,
    },

    // ── Camera flights ──────────────────────────────────────────────
    /// Fly the camera to a position in front of the box.
    MoveFront,

    /// Fly the camera to a position on the left of the box.
    MoveLeft,

    /// Cancel any flight and return the camera to its start position.
    ResetCamera,

    // ── Orbit controls ──────────────────────────────────────────────
    /// Rotate the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Lighting ────────────────────────────────────────────────────
    /// Set the ambient light intensity.
    SetAmbientIntensity(f32),

    /// Set the directional light intensity and position.
    SetDirectionalLight {
        /// Light intensity.
        intensity: f32,
        /// Light position; it shines toward the origin.
        position: Vec3,
    },
}
