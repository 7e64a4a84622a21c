//! Typed grading configuration.
//!
//! The tunables a host exposes for the grading stage, with their defaults
//! and ranges. Loaded from YAML; every field is optional.
//!
//! ```yaml
//! dither:
//!   enabled: true
//!   gamma: 2.2
//! blend:
//!   intensity: 0.8
//!   chroma_amount: 1.0
//!   luma_amount: 0.5
//!   sample_mode: tetrahedral
//! ```

use std::path::Path;

use lutgrade_lut::SampleMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dither::DitherParameters;
use crate::{OpsError, OpsResult};

/// Valid range of [`DitherParameters::gamma`].
pub const GAMMA_RANGE: std::ops::RangeInclusive<f32> = 1.0..=6.0;

/// How strongly the LUT result replaces the source color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendParameters {
    /// Overall mix between source (0) and LUT color (1).
    #[serde(alias = "lutIntensity")]
    pub intensity: f32,
    /// Mix of the normalized RGB direction.
    #[serde(alias = "lutChromaAmount")]
    pub chroma_amount: f32,
    /// Mix of the RGB vector length.
    #[serde(alias = "lutLumaAmount")]
    pub luma_amount: f32,
    /// LUT reconstruction strategy.
    #[serde(alias = "sampleMode")]
    pub sample_mode: SampleMode,
}

impl Default for BlendParameters {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            chroma_amount: 1.0,
            luma_amount: 1.0,
            sample_mode: SampleMode::Trilinear,
        }
    }
}

/// Full parameter snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeConfig {
    /// Output dithering.
    pub dither: DitherParameters,
    /// LUT sampling and blending.
    pub blend: BlendParameters,
}

impl GradeConfig {
    /// Parses and validates a YAML config.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        debug!(
            mode = %config.blend.sample_mode,
            dither = config.dither.enabled,
            "loaded grade config"
        );
        Ok(config)
    }

    /// Reads, parses and validates a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OpsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks every field against its documented range.
    ///
    /// Loaders call this once; the per-pixel path trusts the snapshot.
    pub fn validate(&self) -> OpsResult<()> {
        if !GAMMA_RANGE.contains(&self.dither.gamma) {
            return Err(OpsError::InvalidParameter(format!(
                "dither gamma {} outside [1, 6]",
                self.dither.gamma
            )));
        }
        let amounts = [
            ("intensity", self.blend.intensity),
            ("chroma_amount", self.blend.chroma_amount),
            ("luma_amount", self.blend.luma_amount),
        ];
        for (name, value) in amounts {
            if !(0.0..=1.0).contains(&value) {
                return Err(OpsError::InvalidParameter(format!(
                    "{} {} outside [0, 1]",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
