//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, texture uploads and the
//! bind group boilerplate shared by the render passes.

/// Shared wgpu boilerplate for bind group layouts and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth target and sampled material textures.
pub mod texture;
