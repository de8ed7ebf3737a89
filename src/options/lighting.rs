use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Scene background, ambient and directional light parameters.
pub struct LightingOptions {
    /// Clear color as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub background: u32,
    /// Ambient light color as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub ambient_color: u32,
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub ambient_intensity: f32,
    /// Directional light color as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub directional_color: u32,
    /// Directional light intensity.
    #[schemars(title = "Directional", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub directional_intensity: f32,
    /// Directional light position; the light shines toward the origin.
    #[schemars(title = "Light Position", range(min = -15.0, max = 15.0), extend("step" = 0.01))]
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            background: 0x00f5_f5f5,
            ambient_color: 0x00ff_ffff,
            ambient_intensity: 1.0,
            directional_color: 0x00ff_ffff,
            directional_intensity: 1.0,
            directional_position: [4.0, 5.0, -2.0],
        }
    }
}
