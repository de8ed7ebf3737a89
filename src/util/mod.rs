//! Shared utilities: frame timing and color conversion.

pub mod color;
pub mod frame_timing;
