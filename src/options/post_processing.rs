use serde::{Deserialize, Serialize};

/// Tone mapping operator applied in the composite pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// ACES filmic curve.
    #[default]
    Aces,
    /// Pass HDR values straight through (clamped by the surface).
    None,
}

/// Color space the composite pass writes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputColorSpace {
    /// Write linear values without sRGB encoding.
    #[default]
    Linear,
    /// Encode to sRGB.
    Srgb,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Fog, bloom and final output parameters.
pub struct PostProcessingOptions {
    /// Overall bloom contribution.
    pub bloom_strength: f32,
    /// Blend between tight (0) and wide (1) bloom falloff.
    pub bloom_radius: f32,
    /// Luminance above which pixels bloom.
    pub bloom_threshold: f32,
    /// Exponential-squared fog density.
    pub fog_density: f32,
    /// Linear exposure multiplier before tone mapping.
    pub exposure: f32,
    /// Tone mapping operator.
    pub tone_mapping: ToneMapping,
    /// Output encoding.
    pub output_color_space: OutputColorSpace,
    /// Requested MSAA sample count for the scene pass. Falls back to 1 when
    /// the adapter cannot multisample the HDR format.
    pub msaa_samples: u32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_strength: 1.5,
            bloom_radius: 0.0,
            bloom_threshold: 0.002,
            fog_density: 0.3,
            exposure: 1.0,
            tone_mapping: ToneMapping::Aces,
            output_color_space: OutputColorSpace::Linear,
            msaa_samples: 4,
        }
    }
}
