use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Box", inline)]
#[serde(default)]
/// Parametric box geometry and material parameters.
pub struct ModelOptions {
    /// Initial width (x extent).
    #[schemars(title = "Width", range(min = 1.0, max = 30.0), extend("step" = 0.1))]
    pub width: f32,
    /// Initial depth (z extent).
    #[schemars(title = "Depth", range(min = 1.0, max = 30.0), extend("step" = 0.1))]
    pub depth: f32,
    /// Fixed height (y extent); the box rests on the floor.
    #[schemars(skip)]
    pub height: f32,
    /// Smallest accepted width/depth.
    #[schemars(skip)]
    pub min_dimension: f32,
    /// Largest accepted width/depth.
    #[schemars(skip)]
    pub max_dimension: f32,
    /// Width/depth increment applied by the nudge key bindings.
    #[schemars(skip)]
    pub nudge_step: f32,
    /// Grid subdivisions per box face edge.
    #[schemars(skip)]
    pub segments: u32,
    /// Directory (or URL prefix on the web) holding the wood-board maps.
    #[schemars(skip)]
    pub texture_root: String,
    /// Strength of the ambient occlusion map.
    #[schemars(title = "AO Intensity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ao_intensity: f32,
    /// World-space displacement at full height-map value.
    #[schemars(skip)]
    pub displacement_scale: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            depth: 1.0,
            height: 0.8,
            min_dimension: 1.0,
            max_dimension: 30.0,
            nudge_step: 1.0,
            segments: 100,
            texture_root: "assets/textures/wood-board".into(),
            ao_intensity: 0.4,
            displacement_scale: 0.001,
        }
    }
}
