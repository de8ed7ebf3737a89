//! GPU render passes of the box viewer.
//!
//! Every pipeline binds the camera at group 0 and lighting at group 1; the
//! box adds its material (group 2) and per-face tiling (group 3).

pub mod box_pass;
pub mod camera;
pub mod floor;
pub mod lighting;
pub(crate) mod pipeline_util;
