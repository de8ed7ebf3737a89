//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, approach flights, box geometry,
//! lighting, floor, keybindings) are consolidated here. Options serialize
//! to/from TOML for presets stored in `assets/presets/`.

mod approach;
mod camera;
mod floor;
mod lighting;
mod model;

use std::path::Path;

pub use approach::{ApproachOptions, ApproachStrategy};
pub use camera::CameraOptions;
pub use floor::FloorOptions;
pub use lighting::LightingOptions;
pub use model::ModelOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WoodboxError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and drag-control parameters.
    pub camera: CameraOptions,
    /// Fly-to camera flight parameters.
    pub approach: ApproachOptions,
    /// Box geometry, limits and material parameters.
    pub model: ModelOptions,
    /// Background and light parameters.
    pub lighting: LightingOptions,
    /// Floor plane and grid parameters.
    pub floor: FloorOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options (slider
    /// ranges and steps for a host-page control panel).
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WoodboxError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, WoodboxError> {
        toml::from_str(content)
            .map_err(|e| WoodboxError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WoodboxError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, WoodboxError> {
        let content =
            std::fs::read_to_string(path).map_err(WoodboxError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`WoodboxError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), WoodboxError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WoodboxError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WoodboxError::Io)?;
        }
        std::fs::write(path, content).map_err(WoodboxError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::BoxCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[approach]
strategy = 'fit_to_view'
speed = 2.5

[lighting]
background = 0x101010
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.approach.strategy, ApproachStrategy::FitToView);
        assert_eq!(opts.approach.speed, 2.5);
        assert_eq!(opts.lighting.background, 0x10_1010);
        // Everything else should be default
        assert_eq!(opts.approach.arrival_epsilon, 0.09);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.model.height, 0.8);
        assert_eq!(opts.floor.divisions, 15);
    }

    #[test]
    fn bundled_presets_parse() {
        let default =
            Options::from_toml_str(include_str!("../../assets/presets/default.toml"))
                .unwrap();
        assert_eq!(default, Options::default());

        let plank =
            Options::from_toml_str(include_str!("../../assets/presets/plank.toml"))
                .unwrap();
        assert_eq!(plank.model.width, 8.0);
        assert_eq!(plank.approach.strategy, ApproachStrategy::FitToView);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, WoodboxError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyF"), Some(BoxCommand::MoveFront));
        assert_eq!(opts.keybindings.lookup("KeyL"), Some(BoxCommand::MoveLeft));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("woodbox-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.model.width = 4.0;
        opts.lighting.directional_position = [1.0, 2.0, 3.0];
        opts.save(&dir.join("wide.toml")).unwrap();

        let loaded = Options::load(&dir.join("wide.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["wide".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("approach"));
        assert!(props.contains_key("model"));
        assert!(props.contains_key("lighting"));
        assert!(!props.contains_key("keybindings"));

        let model = &props["model"]["properties"];
        assert!(model.get("width").is_some());
        assert!(model.get("texture_root").is_none());
        assert_eq!(model["width"]["maximum"], 30.0);
    }
}
