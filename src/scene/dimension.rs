//! Applies width/depth input to the box and keeps the camera at a
//! comparable distance as the box grows or shrinks.

use glam::Vec3;

use super::box_model::{BoxDimensions, BoxModel, DimensionError};

/// Result of a successful resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    /// Dimensions applied.
    pub dimensions: BoxDimensions,
    /// Translation to add to the camera eye (zero when the dolly was
    /// skipped).
    pub camera_offset: Vec3,
}

/// Owns the bounding extent seen at the last camera dolly.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionController {
    prev_extent: f32,
}

impl DimensionController {
    /// Start tracking from the model's current extent.
    #[must_use]
    pub fn new(model: &BoxModel) -> Self {
        Self {
            prev_extent: model.bounding_extent(),
        }
    }

    /// Extent recorded at the last dolly.
    #[must_use]
    pub fn prev_extent(&self) -> f32 {
        self.prev_extent
    }

    /// Resize `model` and compute the matching camera dolly.
    ///
    /// The box is always resized and retiled. The dolly moves the eye
    /// along its horizontal direction from the origin by the change in
    /// bounding extent, and is skipped while a camera flight is running
    /// so the flight target is not chased mid-air.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] for invalid input; nothing changes.
    pub fn apply(
        &mut self,
        model: &mut BoxModel,
        eye: Vec3,
        approach_active: bool,
        width: f32,
        depth: f32,
    ) -> Result<ResizeOutcome, DimensionError> {
        let dimensions = model.set_dimensions(width, depth)?;
        let camera_offset = if approach_active {
            log::debug!("resize during camera flight, dolly skipped");
            Vec3::ZERO
        } else {
            let extent = model.bounding_extent();
            let horizontal = Vec3::new(eye.x, 0.0, eye.z).normalize_or_zero();
            let offset = horizontal * (extent - self.prev_extent);
            self.prev_extent = extent;
            offset
        };
        Ok(ResizeOutcome {
            dimensions,
            camera_offset,
        })
    }

    /// Re-sync with the model (after a reset or options reload).
    pub fn reset(&mut self, model: &BoxModel) {
        self.prev_extent = model.bounding_extent();
    }
}
