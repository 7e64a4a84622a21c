//! The grading stage: LUT lookup, blend, dither.
//!
//! Per pixel:
//!
//! 1. Sample the [`CubeVolume`] with the configured [`SampleMode`].
//! 2. Mix toward the LUT color by `intensity`.
//! 3. Split source and LUT colors into direction (normalized RGB) and
//!    magnitude (RGB length); mix directions by `chroma_amount`, magnitudes
//!    by `luma_amount`, and recombine.
//! 4. Dither with the threshold of the pixel's [`NoiseField`] cell.
//!
//! Step 3 is a plain vector split in RGB space, not a perceptual model.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lutgrade_lut::CubeVolume;
//! use lutgrade_math::Vec3;
//! use lutgrade_ops::{GradeConfig, GradePipeline, NoiseField};
//!
//! let pipeline = GradePipeline::new(
//!     Arc::new(CubeVolume::identity(33)),
//!     Arc::new(NoiseField::bayer(8).unwrap()),
//!     GradeConfig::default(),
//! );
//! let rgba = pipeline.apply(Vec3::new(0.5, 0.25, 0.75), 10, 20);
//! assert_eq!(rgba[3], 1.0);
//! ```

use std::sync::Arc;

use lutgrade_lut::{CubeVolume, LinearFilter, LutSampler, SampleMode, TextureFilter};
use lutgrade_math::{lerp, Vec3};
use tracing::debug;

use crate::config::GradeConfig;
use crate::dither::Ditherer;
use crate::NoiseField;

/// Builds the strategy object for a mode around the pipeline's filter.
fn build_sampler(mode: SampleMode, filter: &Arc<dyn TextureFilter>) -> Arc<dyn LutSampler> {
    mode.sampler_with(Arc::clone(filter))
}

/// LUT grading with ordered dithering.
///
/// Holds shared read-only resources (cube, noise) and one parameter
/// snapshot. The snapshot can only be replaced through `&mut self`, so a
/// frame being processed through `&self` always sees one consistent set.
#[derive(Clone)]
pub struct GradePipeline {
    cube: Arc<CubeVolume>,
    noise: Arc<NoiseField>,
    config: GradeConfig,
    texture_filter: Arc<dyn TextureFilter>,
    sampler: Arc<dyn LutSampler>,
    ditherer: Ditherer,
}

impl GradePipeline {
    /// Creates a pipeline. `Direct` mode uses the software [`LinearFilter`]
    /// until [`with_texture_filter`](Self::with_texture_filter) swaps it.
    pub fn new(cube: Arc<CubeVolume>, noise: Arc<NoiseField>, config: GradeConfig) -> Self {
        let texture_filter: Arc<dyn TextureFilter> = Arc::new(LinearFilter);
        let sampler = build_sampler(config.blend.sample_mode, &texture_filter);
        debug!(
            cube_size = cube.size(),
            noise_w = noise.width(),
            noise_h = noise.height(),
            mode = %config.blend.sample_mode,
            "GradePipeline::new"
        );
        Self {
            cube,
            noise,
            config,
            texture_filter,
            sampler,
            ditherer: Ditherer::new(config.dither),
        }
    }

    /// Uses `filter` as the texture sampler behind `Direct` mode.
    pub fn with_texture_filter(mut self, filter: Arc<dyn TextureFilter>) -> Self {
        self.sampler = build_sampler(self.config.blend.sample_mode, &filter);
        self.texture_filter = filter;
        self
    }

    /// Replaces the parameter snapshot. Call between frames.
    pub fn set_config(&mut self, config: GradeConfig) {
        if config.blend.sample_mode != self.config.blend.sample_mode {
            self.sampler = build_sampler(config.blend.sample_mode, &self.texture_filter);
        }
        self.ditherer = Ditherer::new(config.dither);
        self.config = config;
        debug!(mode = %config.blend.sample_mode, "GradePipeline::set_config");
    }

    /// Current parameter snapshot.
    pub fn config(&self) -> &GradeConfig {
        &self.config
    }

    /// The LUT volume.
    pub fn cube(&self) -> &CubeVolume {
        &self.cube
    }

    /// The dither threshold field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Raw LUT lookup with the configured mode, before any blending.
    #[inline]
    pub fn sample_lut(&self, src: Vec3) -> Vec3 {
        self.sampler.sample(&self.cube, src)
    }

    /// Graded color before dithering (steps 1-3).
    #[inline]
    pub fn grade(&self, src: Vec3) -> Vec3 {
        let blend = &self.config.blend;

        let lut = src.lerp(self.sample_lut(src), blend.intensity);

        let direction = src.normalize().lerp(lut.normalize(), blend.chroma_amount);
        let magnitude = lerp(src.length(), lut.length(), blend.luma_amount);

        direction * magnitude
    }

    /// Final RGBA for the pixel at `(x, y)`. Alpha is always 1.
    #[inline]
    pub fn apply(&self, src: Vec3, x: usize, y: usize) -> [f32; 4] {
        let graded = self.grade(src);
        let out = self.ditherer.apply(graded, self.noise.sample(x, y));
        [out.x, out.y, out.z, 1.0]
    }
}

impl std::fmt::Debug for GradePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradePipeline")
            .field("cube_size", &self.cube.size())
            .field("noise", &(self.noise.width(), self.noise.height()))
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::dither;
    use approx::assert_abs_diff_eq;

    fn invert_cube() -> Arc<CubeVolume> {
        Arc::new(CubeVolume::from_fn(17, |[r, g, b]| [1.0 - r, 1.0 - g, 1.0 - b]).unwrap())
    }

    fn pipeline(config: GradeConfig) -> GradePipeline {
        GradePipeline::new(invert_cube(), Arc::new(NoiseField::bayer(4).unwrap()), config)
    }

    #[test]
    fn test_black_pixel_has_no_nan() {
        let mut config = GradeConfig::default();
        config.blend.chroma_amount = 0.5;
        config.blend.luma_amount = 0.5;
        let p = pipeline(config);
        let out = p.grade(Vec3::ZERO);
        assert!(out.is_finite());
        let rgba = p.apply(Vec3::ZERO, 0, 0);
        assert!(rgba.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_full_blend_returns_lut_color() {
        let mut config = GradeConfig::default();
        config.dither.enabled = false;
        let p = pipeline(config);
        let src = Vec3::new(0.25, 0.5, 0.75);
        let out = p.grade(src);
        let lut = p.sample_lut(src);
        assert_abs_diff_eq!(out.x, lut.x, epsilon = 1e-5);
        assert_abs_diff_eq!(out.y, lut.y, epsilon = 1e-5);
        assert_abs_diff_eq!(out.z, lut.z, epsilon = 1e-5);
    }

    #[test]
    fn test_luma_only_keeps_source_direction() {
        let mut config = GradeConfig::default();
        config.dither.enabled = false;
        config.blend.chroma_amount = 0.0;
        let p = pipeline(config);
        let src = Vec3::new(0.2, 0.4, 0.1);
        let out = p.grade(src);
        let lut = p.sample_lut(src);
        assert_abs_diff_eq!(out.length(), lut.length(), epsilon = 1e-5);
        let dir = out.normalize();
        let src_dir = src.normalize();
        assert_abs_diff_eq!(dir.x, src_dir.x, epsilon = 1e-5);
        assert_abs_diff_eq!(dir.y, src_dir.y, epsilon = 1e-5);
        assert_abs_diff_eq!(dir.z, src_dir.z, epsilon = 1e-5);
    }

    #[test]
    fn test_set_config_switches_mode() {
        let mut p = pipeline(GradeConfig::default());
        let src = Vec3::new(0.31, 0.62, 0.17);
        let before = p.sample_lut(src);
        let mut config = *p.config();
        config.blend.sample_mode = SampleMode::Tetrahedral;
        p.set_config(config);
        assert_eq!(p.config().blend.sample_mode, SampleMode::Tetrahedral);
        // The inverting cube is linear, so both modes agree.
        let after = p.sample_lut(src);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-5);
    }

    #[test]
    fn test_apply_uses_pixel_noise() {
        let p = pipeline(GradeConfig::default());
        let src = Vec3::new(0.4, 0.5, 0.6);
        let graded = p.grade(src);
        for (x, y) in [(0, 0), (1, 2), (7, 5)] {
            let expected = dither(graded, 2.2, p.noise().sample(x, y), true);
            let rgba = p.apply(src, x, y);
            assert_eq!([rgba[0], rgba[1], rgba[2]], expected.to_array());
            assert_eq!(rgba[3], 1.0);
        }
    }

    struct Constant(Vec3);

    impl TextureFilter for Constant {
        fn filter(&self, _cube: &CubeVolume, _uvw: Vec3) -> Vec3 {
            self.0
        }
    }

    #[test]
    fn test_custom_texture_filter_for_direct() {
        let mut config = GradeConfig::default();
        config.blend.sample_mode = SampleMode::Direct;
        let p = pipeline(config).with_texture_filter(Arc::new(Constant(Vec3::splat(0.5))));
        assert_eq!(p.sample_lut(Vec3::new(0.1, 0.2, 0.3)), Vec3::splat(0.5));
    }
}
