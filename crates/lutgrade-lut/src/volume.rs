//! The 3D lattice of graded colors.
//!
//! A [`CubeVolume`] is the color transform the loader hands to the grading
//! stage: `size³` RGB samples on a regular grid over the unit cube. It is
//! built once and only read afterwards.

use lutgrade_math::Vec3;
use tracing::debug;

use crate::{LutError, LutResult};

/// A cubic 3D grid of RGB samples.
///
/// # Structure
///
/// - `size^3` entries, each holding an RGB output value
/// - Stored R-major: R varies fastest, then G, then B (`.cube` order)
/// - Standard sizes are 17, 33 or 65; the grading default is 33
///
/// # Example
///
/// ```rust
/// use lutgrade_lut::CubeVolume;
///
/// let cube = CubeVolume::identity(33);
/// let c = cube.fetch(32, 0, 16);
/// assert_eq!(c.to_array(), [1.0, 0.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct CubeVolume {
    /// Flattened as: [(r0,g0,b0), (r1,g0,b0), ..., (rN,gN,bN)]
    data: Vec<[f32; 3]>,
    size: usize,
}

impl CubeVolume {
    /// Default lattice size.
    pub const DEFAULT_SIZE: usize = 33;

    /// Creates a volume from raw samples.
    ///
    /// Data must be R-major with exactly `size^3` entries and `size >= 2`.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "cube size must be at least 2, got {}",
                size
            )));
        }
        let expected = size
            .checked_mul(size)
            .and_then(|v| v.checked_mul(size))
            .ok_or_else(|| LutError::InvalidSize(format!("cube size {} overflows", size)))?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        debug!(size, entries = expected, "CubeVolume::from_data");
        Ok(Self { data, size })
    }

    /// Builds a volume by evaluating `f` at every lattice point.
    ///
    /// `f` receives the normalized input color of the lattice point
    /// (`index / (size - 1)` per channel) and returns the graded color.
    ///
    /// ```rust
    /// use lutgrade_lut::CubeVolume;
    ///
    /// // Channel swap look
    /// let cube = CubeVolume::from_fn(17, |[r, g, b]| [b, g, r]).unwrap();
    /// assert_eq!(cube.fetch(16, 0, 0).to_array(), [0.0, 0.0, 1.0]);
    /// ```
    pub fn from_fn<F>(size: usize, mut f: F) -> LutResult<Self>
    where
        F: FnMut([f32; 3]) -> [f32; 3],
    {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "cube size must be at least 2, got {}",
                size
            )));
        }
        let scale = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(f([r as f32 / scale, g as f32 / scale, b as f32 / scale]));
                }
            }
        }
        Self::from_data(data, size)
    }

    /// Creates an identity (pass-through) volume.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 2, "cube size must be at least 2");
        let scale = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f32 / scale, g as f32 / scale, b as f32 / scale]);
                }
            }
        }
        Self { data, size }
    }

    /// Lattice dimension N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw samples in R-major order.
    #[inline]
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Returns the stored sample at integer lattice indices.
    ///
    /// Indices must already lie in `[0, size - 1]`; like a hardware texel
    /// fetch there is no clamping here.
    #[inline]
    pub fn fetch(&self, ix: usize, iy: usize, iz: usize) -> Vec3 {
        Vec3::from_array(self.data[iz * self.size * self.size + iy * self.size + ix])
    }

    /// [`fetch`](Self::fetch) with the indices packed in an array.
    #[inline]
    pub fn fetch_at(&self, idx: [usize; 3]) -> Vec3 {
        self.fetch(idx[0], idx[1], idx[2])
    }
}
