use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the fly-to target of a camera approach is placed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ApproachStrategy {
    /// Fixed direction scaled by the box's bounding extent.
    #[default]
    BoundingExtent,
    /// Distance chosen from the field of view so the whole box is framed.
    FitToView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera Approach", inline)]
#[serde(default)]
/// Parameters of the "move front" / "move left" camera flights.
pub struct ApproachOptions {
    /// Target placement strategy.
    #[schemars(title = "Strategy")]
    pub strategy: ApproachStrategy,
    /// Multiplier on frame delta time used as the interpolation factor.
    #[schemars(title = "Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub speed: f32,
    /// Distance below which the camera counts as arrived.
    #[schemars(skip)]
    pub arrival_epsilon: f32,
    /// Unnormalized direction of the front target.
    #[schemars(skip)]
    pub front_direction: [f32; 3],
    /// Extent multiplier for the front target.
    #[schemars(title = "Front Distance", range(min = 0.5, max = 5.0), extend("step" = 0.05))]
    pub front_factor: f32,
    /// Unnormalized direction of the left target.
    #[schemars(skip)]
    pub left_direction: [f32; 3],
    /// Extent multiplier for the left target.
    #[schemars(title = "Left Distance", range(min = 0.5, max = 5.0), extend("step" = 0.05))]
    pub left_factor: f32,
}

impl Default for ApproachOptions {
    fn default() -> Self {
        Self {
            strategy: ApproachStrategy::BoundingExtent,
            speed: 1.0,
            arrival_epsilon: 0.09,
            front_direction: [0.0, 5.0, 5.0],
            front_factor: 1.3,
            left_direction: [-5.0, 5.0, 0.0],
            left_factor: 1.5,
        }
    }
}
