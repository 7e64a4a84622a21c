//! Tileable threshold field for ordered dithering.
//!
//! The field is addressed in pixel units and wraps with integer modulo, so
//! a 64x64 tile repeats across the frame. The pattern is static: the same
//! pixel gets the same threshold every frame.

use tracing::debug;

use crate::{OpsError, OpsResult};

/// A tileable 2D scalar field with values in [0, 1].
///
/// # Example
///
/// ```rust
/// use lutgrade_ops::NoiseField;
///
/// let noise = NoiseField::bayer(4).unwrap();
/// assert_eq!(noise.sample(0, 0), noise.sample(4, 8));
/// ```
#[derive(Debug, Clone)]
pub struct NoiseField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl NoiseField {
    /// Default tile edge for loaded noise textures.
    pub const DEFAULT_SIZE: usize = 64;

    /// Creates a field from row-major float samples.
    pub fn from_f32(width: usize, height: usize, data: Vec<f32>) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidDimensions(
                "noise width and height must be > 0".into(),
            ));
        }
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| OpsError::InvalidDimensions("noise dimensions overflow".into()))?;
        if data.len() != expected {
            return Err(OpsError::SizeMismatch(format!(
                "expected {} noise samples for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        debug!(width, height, "NoiseField::from_f32");
        Ok(Self { width, height, data })
    }

    /// Creates a field from an 8-bit grayscale image, mapping `v` to `v / 255`.
    pub fn from_u8(width: usize, height: usize, pixels: &[u8]) -> OpsResult<Self> {
        let data = pixels.iter().map(|&v| v as f32 / 255.0).collect();
        Self::from_f32(width, height, data)
    }

    /// Builds a `size x size` Bayer threshold matrix normalized to [0, 1).
    ///
    /// `size` must be a power of two, at least 2. Useful when no blue-noise
    /// texture is shipped with the LUT.
    pub fn bayer(size: usize) -> OpsResult<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(OpsError::InvalidDimensions(format!(
                "bayer size must be a power of two >= 2, got {}",
                size
            )));
        }

        // M(2n) = [[4M, 4M+2], [4M+3, 4M+1]]
        let mut matrix = vec![0u32];
        let mut n = 1;
        while n < size {
            let next_n = n * 2;
            let mut next = vec![0u32; next_n * next_n];
            for y in 0..n {
                for x in 0..n {
                    let v = 4 * matrix[y * n + x];
                    next[y * next_n + x] = v;
                    next[y * next_n + x + n] = v + 2;
                    next[(y + n) * next_n + x] = v + 3;
                    next[(y + n) * next_n + x + n] = v + 1;
                }
            }
            matrix = next;
            n = next_n;
        }

        let scale = 1.0 / (size * size) as f32;
        let data = matrix.into_iter().map(|v| v as f32 * scale).collect();
        Self::from_f32(size, size, data)
    }

    /// Tile width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tile height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Threshold for pixel `(x, y)`, wrapping at the tile edges.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> f32 {
        self.data[(y % self.height) * self.width + x % self.width]
    }
}
