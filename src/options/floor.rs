use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Floor", inline)]
#[serde(default)]
/// Ground plane and grid helper parameters.
pub struct FloorOptions {
    /// Draw the solid floor plane.
    #[schemars(title = "Show Floor")]
    pub show_floor: bool,
    /// Draw the grid lines.
    #[schemars(title = "Show Grid")]
    pub show_grid: bool,
    /// Edge length of the floor plane and the grid.
    #[schemars(skip)]
    pub size: f32,
    /// Number of grid cells along each axis.
    #[schemars(skip)]
    pub divisions: u32,
    /// Height of the floor plane (just under the grid).
    #[schemars(skip)]
    pub floor_height: f32,
    /// Floor color as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub floor_color: u32,
    /// Color of the two center lines as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub center_line_color: u32,
    /// Color of the remaining grid lines as `0xRRGGBB` (sRGB).
    #[schemars(skip)]
    pub grid_color: u32,
}

impl Default for FloorOptions {
    fn default() -> Self {
        Self {
            show_floor: true,
            show_grid: true,
            size: 15.0,
            divisions: 15,
            floor_height: -0.01,
            floor_color: 0x0000_0000,
            center_line_color: 0x0044_4444,
            grid_color: 0x0088_8888,
        }
    }
}
