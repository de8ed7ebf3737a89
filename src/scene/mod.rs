//! The box scene: parametric model, resize handling, generated meshes and
//! the command-driven state that ties them to the camera.

pub mod box_model;
pub mod dimension;
pub mod mesh;
pub mod state;

pub use box_model::{BoxDimensions, BoxModel, DimensionError, Face, FaceTiling};
pub use dimension::{DimensionController, ResizeOutcome};
pub use state::BoxScene;
