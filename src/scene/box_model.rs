//! The parametric box: dimensions, placement and per-face texture tiling.

use std::fmt;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::options::ModelOptions;

/// One face of the box, in the fixed material order `+X, -X, +Y, -Y, +Z,
/// -Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Right side, spans the depth.
    PosX,
    /// Left side, spans the depth.
    NegX,
    /// Top.
    PosY,
    /// Bottom.
    NegY,
    /// Front side, spans the width.
    PosZ,
    /// Back side, spans the width.
    NegZ,
}

impl Face {
    /// All faces in material order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Position of this face in material order.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward unit normal.
    #[must_use]
    pub fn normal(self) -> Vec3 {
        match self {
            Self::PosX => Vec3::X,
            Self::NegX => Vec3::NEG_X,
            Self::PosY => Vec3::Y,
            Self::NegY => Vec3::NEG_Y,
            Self::PosZ => Vec3::Z,
            Self::NegZ => Vec3::NEG_Z,
        }
    }

    /// World directions of increasing texture `u` and `v` (image up) on
    /// this face, seen from outside.
    #[must_use]
    pub fn uv_axes(self) -> (Vec3, Vec3) {
        match self {
            Self::PosX => (Vec3::NEG_Z, Vec3::Y),
            Self::NegX => (Vec3::Z, Vec3::Y),
            Self::PosY => (Vec3::X, Vec3::NEG_Z),
            Self::NegY => (Vec3::X, Vec3::Z),
            Self::PosZ => (Vec3::X, Vec3::Y),
            Self::NegZ => (Vec3::NEG_X, Vec3::Y),
        }
    }
}

/// Width (x) and depth (z) of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDimensions {
    /// Extent along x.
    pub width: f32,
    /// Extent along z.
    pub depth: f32,
}

/// Which input a [`DimensionError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionAxis {
    /// The width input.
    Width,
    /// The depth input.
    Depth,
}

impl fmt::Display for DimensionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Depth => f.write_str("depth"),
        }
    }
}

/// Rejected dimension input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionError {
    /// NaN or infinite value (e.g. an empty DOM field parsed as NaN).
    NotFinite {
        /// Offending input.
        axis: DimensionAxis,
    },
    /// Zero or negative value.
    NotPositive {
        /// Offending input.
        axis: DimensionAxis,
        /// The value given.
        value: f32,
    },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { axis } => write!(f, "{axis} is not a number"),
            Self::NotPositive { axis, value } => {
                write!(f, "{axis} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for DimensionError {}

impl BoxDimensions {
    /// Validate raw input.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] for non-finite or non-positive values.
    pub fn new(width: f32, depth: f32) -> Result<Self, DimensionError> {
        let check = |axis, value: f32| {
            if !value.is_finite() {
                Err(DimensionError::NotFinite { axis })
            } else if value <= 0.0 {
                Err(DimensionError::NotPositive { axis, value })
            } else {
                Ok(value)
            }
        };
        Ok(Self {
            width: check(DimensionAxis::Width, width)?,
            depth: check(DimensionAxis::Depth, depth)?,
        })
    }

    /// Clamp both axes into `[min, max]`.
    #[must_use]
    pub fn clamped(self, min: f32, max: f32) -> Self {
        Self {
            width: self.width.clamp(min, max),
            depth: self.depth.clamp(min, max),
        }
    }
}

/// Texture repeat factor `(u, v)` for every face.
///
/// Tiling density follows the physical size of each face: the side faces
/// facing ±X span the depth, the ones facing ±Z span the width, and the
/// top and bottom span both. The vertical axis of the side faces keeps a
/// single tile since the height never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTiling {
    repeats: [Vec2; 6],
}

impl FaceTiling {
    /// Tiling for a box of the given dimensions.
    #[must_use]
    pub fn for_dimensions(dims: BoxDimensions) -> Self {
        let mut repeats = [Vec2::ONE; 6];
        for face in Face::ALL {
            repeats[face.index()] = match face {
                Face::PosX | Face::NegX => Vec2::new(dims.depth, 1.0),
                Face::PosY | Face::NegY => Vec2::new(dims.width, dims.depth),
                Face::PosZ | Face::NegZ => Vec2::new(dims.width, 1.0),
            };
        }
        Self { repeats }
    }

    /// Repeat factor of one face.
    #[must_use]
    pub fn repeat(&self, face: Face) -> Vec2 {
        self.repeats[face.index()]
    }

    /// All repeat factors in material order.
    #[must_use]
    pub fn repeats(&self) -> &[Vec2; 6] {
        &self.repeats
    }
}

/// A unit box mesh scaled to `(width, height, depth)` and lifted so it
/// rests on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    dimensions: BoxDimensions,
    height: f32,
    min_dimension: f32,
    max_dimension: f32,
    tiling: FaceTiling,
}

impl BoxModel {
    /// Build the model from options. Invalid initial dimensions fall back
    /// to the lower nudge limit.
    #[must_use]
    pub fn new(options: &ModelOptions) -> Self {
        let min = options.min_dimension.max(f32::EPSILON);
        let max = options.max_dimension.max(min);
        let dimensions = BoxDimensions::new(options.width, options.depth)
            .unwrap_or(BoxDimensions {
                width: min,
                depth: min,
            });
        Self {
            dimensions,
            height: options.height,
            min_dimension: min,
            max_dimension: max,
            tiling: FaceTiling::for_dimensions(dimensions),
        }
    }

    /// Resize the box to exactly `width` x `depth` and recompute the face
    /// tiling.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] and leaves the box untouched for
    /// non-finite or non-positive input.
    pub fn set_dimensions(
        &mut self,
        width: f32,
        depth: f32,
    ) -> Result<BoxDimensions, DimensionError> {
        let dims = BoxDimensions::new(width, depth)?;
        self.dimensions = dims;
        self.tiling = FaceTiling::for_dimensions(dims);
        Ok(dims)
    }

    /// Take the height and nudge range from new options. Width and depth
    /// are kept; `options.width` / `options.depth` only seed a new model.
    pub fn apply_options(&mut self, options: &ModelOptions) {
        self.min_dimension = options.min_dimension.max(f32::EPSILON);
        self.max_dimension = options.max_dimension.max(self.min_dimension);
        self.height = options.height;
    }

    /// Current width and depth.
    #[must_use]
    pub fn dimensions(&self) -> BoxDimensions {
        self.dimensions
    }

    /// Dimensions after stepping by `width` / `depth` nudge steps, kept
    /// inside the configured `[min_dimension, max_dimension]` range.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] if a step leaves an axis non-positive.
    pub fn nudged(
        &self,
        width: f32,
        depth: f32,
    ) -> Result<BoxDimensions, DimensionError> {
        Ok(BoxDimensions::new(
            self.dimensions.width + width,
            self.dimensions.depth + depth,
        )?
        .clamped(self.min_dimension, self.max_dimension))
    }

    /// Current face tiling.
    #[must_use]
    pub fn tiling(&self) -> &FaceTiling {
        &self.tiling
    }

    /// Fixed height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Scale applied to the unit mesh.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.dimensions.width, self.height, self.dimensions.depth)
    }

    /// Center of the box (bottom face on `y = 0`).
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(0.0, self.height * 0.5, 0.0)
    }

    /// Model matrix of the unit mesh.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale(),
            Quat::IDENTITY,
            self.translation(),
        )
    }

    /// Size of the axis-aligned bounding box.
    #[must_use]
    pub fn bounding_size(&self) -> Vec3 {
        self.scale()
    }

    /// Largest axis of the bounding box.
    #[must_use]
    pub fn bounding_extent(&self) -> f32 {
        self.bounding_size().max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BoxModel {
        BoxModel::new(&ModelOptions::default())
    }

    #[test]
    fn default_box_rests_on_floor() {
        let m = model();
        assert_eq!(m.scale(), Vec3::new(1.0, 0.8, 1.0));
        assert_eq!(m.translation(), Vec3::new(0.0, 0.4, 0.0));
        let bottom = m.model_matrix().transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!(bottom.y.abs() < 1e-6);
    }

    #[test]
    fn every_face_tiles_with_width_or_depth() {
        let mut m = model();
        for (w, d) in [(1.0, 1.0), (3.5, 2.0), (0.5, 45.0), (0.01, 120.0)] {
            let _ = m.set_dimensions(w, d).unwrap();
            assert_eq!(m.scale(), Vec3::new(w, 0.8, d));
            let tiling = m.tiling();
            for face in Face::ALL {
                let r = tiling.repeat(face);
                match face {
                    Face::PosX | Face::NegX => assert_eq!(r, Vec2::new(d, 1.0)),
                    Face::PosY | Face::NegY => assert_eq!(r, Vec2::new(w, d)),
                    Face::PosZ | Face::NegZ => assert_eq!(r, Vec2::new(w, 1.0)),
                }
            }
        }
    }

    #[test]
    fn resize_scales_width_and_depth_only() {
        let mut m = model();
        let _ = m.set_dimensions(4.0, 2.0).unwrap();
        assert_eq!(m.scale(), Vec3::new(4.0, 0.8, 2.0));
        assert_eq!(m.bounding_extent(), 4.0);
        assert_eq!(m.translation().y, 0.4);
    }

    #[test]
    fn invalid_input_is_rejected_without_change() {
        let mut m = model();
        let _ = m.set_dimensions(2.0, 3.0).unwrap();
        assert_eq!(
            m.set_dimensions(f32::NAN, 1.0),
            Err(DimensionError::NotFinite {
                axis: DimensionAxis::Width
            })
        );
        assert_eq!(
            m.set_dimensions(1.0, -2.0),
            Err(DimensionError::NotPositive {
                axis: DimensionAxis::Depth,
                value: -2.0
            })
        );
        assert_eq!(
            m.dimensions(),
            BoxDimensions {
                width: 2.0,
                depth: 3.0
            }
        );
    }

    #[test]
    fn typed_dimensions_are_applied_unclamped() {
        let mut m = model();
        let dims = m.set_dimensions(0.5, 45.0).unwrap();
        assert_eq!(dims, BoxDimensions { width: 0.5, depth: 45.0 });
        assert_eq!(m.tiling().repeat(Face::PosY), Vec2::new(0.5, 45.0));
        assert_eq!(m.bounding_extent(), 45.0);
    }

    #[test]
    fn nudges_stay_inside_the_configured_range() {
        let mut m = model();
        let _ = m.set_dimensions(29.5, 1.5).unwrap();
        assert_eq!(
            m.nudged(1.0, -1.0).unwrap(),
            BoxDimensions { width: 30.0, depth: 1.0 }
        );
        let _ = m.set_dimensions(0.5, 1.0).unwrap();
        assert_eq!(m.nudged(0.25, 0.0).unwrap().width, 1.0);
        assert!(m.nudged(-1.0, 0.0).is_err());
    }

    #[test]
    fn uv_axes_are_tangent_to_the_face() {
        for face in Face::ALL {
            let (u, v) = face.uv_axes();
            assert_eq!(u.dot(face.normal()), 0.0);
            assert_eq!(v.dot(face.normal()), 0.0);
            // Right-handed: normal × u points along v.
            assert!(face.normal().cross(u).distance(v) < 1e-6);
        }
    }
}
