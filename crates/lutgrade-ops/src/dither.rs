//! Gamma-aware ordered dithering to 8-bit output.
//!
//! Each channel is snapped to one of the two 8-bit levels around it. The
//! decision boundary between them is placed by a per-pixel threshold from a
//! [`NoiseField`](crate::NoiseField), interpolated in a `x^gamma` domain
//! rather than directly between the two levels, so the averaged output
//! tracks `rgb^gamma` instead of `rgb`.
//!
//! # Example
//!
//! ```rust
//! use lutgrade_ops::dither::{dither, quantize_levels};
//! use lutgrade_math::Vec3;
//!
//! let rgb = Vec3::new(0.3, 0.6, 0.9);
//! let (low, high) = quantize_levels(rgb);
//! let out = dither(rgb, 2.2, 0.5, true);
//! for c in 0..3 {
//!     assert!(out[c] == low[c] || out[c] == high[c]);
//! }
//! ```

use lutgrade_math::Vec3;
use serde::{Deserialize, Serialize};

/// Largest code of the 8-bit output.
pub const OUTPUT_MAX: f32 = 255.0;

/// Process-wide dithering settings, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherParameters {
    /// Dither at all. When false the graded color passes through untouched.
    #[serde(alias = "ditherEnable")]
    pub enabled: bool,
    /// Exponent of the domain the threshold is interpolated in, in [1, 6].
    #[serde(alias = "ditherGamma")]
    pub gamma: f32,
}

impl Default for DitherParameters {
    fn default() -> Self {
        Self {
            enabled: true,
            gamma: 2.2,
        }
    }
}

/// The two representable 8-bit levels bracketing `rgb`, per channel.
///
/// `low = floor(rgb * 255) / 255`, `high = low + 1/255`.
#[inline]
pub fn quantize_levels(rgb: Vec3) -> (Vec3, Vec3) {
    let low = (rgb * OUTPUT_MAX).floor() / OUTPUT_MAX;
    let high = low + Vec3::splat(1.0 / OUTPUT_MAX);
    (low, high)
}

/// Dithers `rgb` to 8-bit levels with threshold `noise` in [0, 1].
///
/// Returns `rgb` unchanged when `enabled` is false. Otherwise every channel
/// becomes `high` where `rgb^gamma` exceeds
/// `lerp(low^gamma, high^gamma, noise)` and `low` elsewhere. Pure: the same
/// inputs always give the same output.
#[inline]
pub fn dither(rgb: Vec3, gamma: f32, noise: f32, enabled: bool) -> Vec3 {
    if !enabled {
        return rgb;
    }
    let (low, high) = quantize_levels(rgb);

    let rgb_linear = rgb.powf(gamma);
    let low_linear = low.powf(gamma);
    let high_linear = high.powf(gamma);
    let threshold = low_linear.lerp(high_linear, noise);

    Vec3::select(rgb_linear.gt(threshold), high, low)
}

/// Applies [`dither`] with a fixed parameter snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ditherer {
    params: DitherParameters,
}

impl Ditherer {
    /// Creates a ditherer for one frame's settings.
    pub fn new(params: DitherParameters) -> Self {
        Self { params }
    }

    /// Dithers one pixel given its noise threshold.
    #[inline]
    pub fn apply(&self, rgb: Vec3, noise: f32) -> Vec3 {
        dither(rgb, self.params.gamma, noise, self.params.enabled)
    }
}
