//! Sample modes for LUT evaluation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::sampler::{Direct, LinearFilter, LutSampler, Tetrahedral, TextureFilter, Trilinear};
use crate::LutError;

/// How the graded color is reconstructed from the lattice.
///
/// The discriminants match the host's combo-box indices. Configs may name
/// a mode (`tetrahedral`) or give its index (`2`); it is always written
/// back by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    /// Texture-sampler trilinear filtering in texel-center space.
    Direct = 0,

    /// Software trilinear blend of the 8 enclosing lattice points.
    #[default]
    Trilinear = 1,

    /// Blend of the 4 vertices of the enclosing tetrahedron.
    ///
    /// More faithful to the LUT than trilinear, slightly more expensive.
    Tetrahedral = 2,
}

impl SampleMode {
    /// All modes in index order.
    pub const ALL: [SampleMode; 3] = [Self::Direct, Self::Trilinear, Self::Tetrahedral];

    /// Builds the strategy for this mode, with `filter` behind `Direct`.
    ///
    /// `filter` is ignored by the software modes.
    pub fn sampler_with<F>(self, filter: F) -> Arc<dyn LutSampler>
    where
        F: TextureFilter + 'static,
    {
        match self {
            Self::Direct => Arc::new(Direct::new(filter)),
            Self::Trilinear => Arc::new(Trilinear),
            Self::Tetrahedral => Arc::new(Tetrahedral),
        }
    }

    /// Builds the strategy for this mode, using the software
    /// [`LinearFilter`] for `Direct`.
    ///
    /// ```rust
    /// use lutgrade_lut::{CubeVolume, SampleMode};
    /// use lutgrade_math::Vec3;
    ///
    /// let cube = CubeVolume::identity(33);
    /// let rgb = Vec3::new(0.25, 0.5, 0.75);
    /// let sampler = SampleMode::Tetrahedral.sampler();
    /// assert_eq!(sampler.sample(&cube, rgb), rgb);
    /// ```
    pub fn sampler(self) -> Arc<dyn LutSampler> {
        self.sampler_with(LinearFilter)
    }

    /// Lowercase name used in configs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Trilinear => "trilinear",
            Self::Tetrahedral => "tetrahedral",
        }
    }
}

impl TryFrom<u32> for SampleMode {
    type Error = LutError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Direct),
            1 => Ok(Self::Trilinear),
            2 => Ok(Self::Tetrahedral),
            _ => Err(LutError::UnknownMode(index.to_string())),
        }
    }
}

impl FromStr for SampleMode {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "trilinear" | "linear" => Ok(Self::Trilinear),
            "tetrahedral" | "tetra" => Ok(Self::Tetrahedral),
            other => Err(LutError::UnknownMode(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for SampleMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(u32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(index) => Self::try_from(index),
            Repr::Name(name) => name.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for mode in SampleMode::ALL {
            assert_eq!(SampleMode::try_from(mode as u32).unwrap(), mode);
        }
        assert!(SampleMode::try_from(3).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Tetrahedral".parse::<SampleMode>().unwrap(), SampleMode::Tetrahedral);
        assert_eq!("linear".parse::<SampleMode>().unwrap(), SampleMode::Trilinear);
        assert_eq!(SampleMode::Direct.to_string(), "direct");
        assert!("cubic".parse::<SampleMode>().is_err());
    }

    #[test]
    fn test_sampler_with_filter() {
        use crate::CubeVolume;
        use lutgrade_math::Vec3;

        struct Fixed;
        impl TextureFilter for Fixed {
            fn filter(&self, _cube: &CubeVolume, _uvw: Vec3) -> Vec3 {
                Vec3::splat(0.5)
            }
        }

        let cube = CubeVolume::identity(5);
        let rgb = Vec3::new(0.1, 0.2, 0.9);
        let direct = SampleMode::Direct.sampler_with(Fixed);
        assert_eq!(direct.sample(&cube, rgb), Vec3::splat(0.5));
        let trilinear = SampleMode::Trilinear.sampler_with(Fixed);
        assert_ne!(trilinear.sample(&cube, rgb), Vec3::splat(0.5));
    }

    #[test]
    fn test_default_is_trilinear() {
        assert_eq!(SampleMode::default(), SampleMode::Trilinear);
    }
}
