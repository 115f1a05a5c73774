//! Tunable scene, camera and rendering settings with TOML support.
//!
//! Every constant the scene is built from lives here. Options serialize
//! to/from TOML so a run can be reproduced or tweaked from a file.

mod camera;
mod controls;
mod decorations;
mod flight;
mod post_processing;
mod tube;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use decorations::DecorationOptions;
pub use flight::FlightOptions;
pub use post_processing::{
    OutputColorSpace, PostProcessingOptions, ToneMapping,
};
use serde::{Deserialize, Serialize};
pub use tube::TubeOptions;

use crate::error::WormholeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[flight]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Path flight timing.
    pub flight: FlightOptions,
    /// Tube mesh parameters.
    pub tube: TubeOptions,
    /// Decoration placement.
    pub decorations: DecorationOptions,
    /// Orbit input response.
    pub controls: ControlOptions,
    /// Fog, bloom and output parameters.
    pub post_processing: PostProcessingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, WormholeError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), WormholeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(WormholeError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
[flight]
look_ahead = 0.05

[decorations]
seed = 7
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.flight.look_ahead, 0.05);
        assert_eq!(opts.decorations.seed, Some(7));
        // Everything else should be default
        assert_eq!(opts.flight.loop_period_ms, 10_000.0);
        assert_eq!(opts.decorations.count, 55);
        assert_eq!(opts.tube.tubular_segments, 222);
    }

    #[test]
    fn enums_use_snake_case() {
        let toml_str = r#"
[post_processing]
tone_mapping = "none"
output_color_space = "srgb"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.post_processing.tone_mapping, ToneMapping::None);
        assert_eq!(
            opts.post_processing.output_color_space,
            OutputColorSpace::Srgb
        );
        assert_eq!(opts.post_processing.bloom_strength, 1.5);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let dir = std::env::temp_dir().join("wormhole-options-test");
        let path = dir.join("bad.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[flight\nlook_ahead = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(WormholeError::OptionsParse(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("wormhole-options-save");
        let path = dir.join("nested").join("opts.toml");
        let mut opts = Options::default();
        opts.controls.damping_factor = 0.1;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/nonexistent/wormhole/options.toml");
        assert!(matches!(Options::load(path), Err(WormholeError::Io(_))));
    }
}
