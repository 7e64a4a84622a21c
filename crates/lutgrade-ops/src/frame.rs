//! Whole-frame grading over interleaved float buffers.
//!
//! Pixels are independent: every output pixel reads only the shared cube,
//! noise and parameter snapshot. With the `parallel` feature rows are
//! spread across the rayon pool.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lutgrade_lut::CubeVolume;
//! use lutgrade_ops::{GradeConfig, GradePipeline, NoiseField};
//!
//! let pipeline = GradePipeline::new(
//!     Arc::new(CubeVolume::identity(17)),
//!     Arc::new(NoiseField::bayer(4).unwrap()),
//!     GradeConfig::default(),
//! );
//! let src = vec![0.5f32; 8 * 4 * 3];
//! let out = pipeline.apply_frame(&src, 8, 4, 3).unwrap();
//! assert_eq!(out.len(), src.len());
//! ```

use lutgrade_math::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::dither::OUTPUT_MAX;
use crate::{GradePipeline, OpsError, OpsResult};

fn validate(src_len: usize, width: usize, height: usize, channels: usize) -> OpsResult<()> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(
            "width and height must be > 0".into(),
        ));
    }
    if channels != 3 && channels != 4 {
        return Err(OpsError::InvalidDimensions(format!(
            "expected 3 or 4 channels, got {}",
            channels
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if src_len != expected {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            expected, src_len
        )));
    }
    Ok(())
}

/// Encodes a dithered value to its 8-bit code.
#[inline]
pub fn encode_u8(v: f32) -> u8 {
    (v * OUTPUT_MAX).round().clamp(0.0, OUTPUT_MAX) as u8
}

impl GradePipeline {
    fn grade_row(&self, src_row: &[f32], dst_row: &mut [f32], y: usize, channels: usize) {
        for (x, (s, d)) in src_row
            .chunks_exact(channels)
            .zip(dst_row.chunks_exact_mut(channels))
            .enumerate()
        {
            let rgba = self.apply(Vec3::new(s[0], s[1], s[2]), x, y);
            d.copy_from_slice(&rgba[..channels]);
        }
    }

    /// Grades an interleaved RGB or RGBA frame.
    ///
    /// Output has the same layout; alpha, when present, is written as 1.
    pub fn apply_frame(
        &self,
        src: &[f32],
        width: usize,
        height: usize,
        channels: usize,
    ) -> OpsResult<Vec<f32>> {
        validate(src.len(), width, height, channels)?;
        trace!(width, height, channels, "GradePipeline::apply_frame");
        debug!(
            width,
            height,
            mode = %self.config().blend.sample_mode,
            dither = self.config().dither.enabled,
            "Grading frame"
        );

        let stride = width * channels;
        let mut dst = vec![0.0f32; src.len()];

        #[cfg(feature = "parallel")]
        dst.par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .enumerate()
            .for_each(|(y, (dst_row, src_row))| self.grade_row(src_row, dst_row, y, channels));

        #[cfg(not(feature = "parallel"))]
        dst.chunks_mut(stride)
            .zip(src.chunks(stride))
            .enumerate()
            .for_each(|(y, (dst_row, src_row))| self.grade_row(src_row, dst_row, y, channels));

        Ok(dst)
    }

    /// Grades a frame and encodes it to 8-bit codes.
    pub fn apply_frame_u8(
        &self,
        src: &[f32],
        width: usize,
        height: usize,
        channels: usize,
    ) -> OpsResult<Vec<u8>> {
        let graded = self.apply_frame(src, width, height, channels)?;
        Ok(graded.into_iter().map(encode_u8).collect())
    }
}
