//! Scalar helpers shared by the LUT samplers and the ditherer.
//!
//! These follow shader-language semantics (`lerp`/`mix`, `saturate`) so
//! that CPU results line up with the GPU path sample for sample.
//!
//! ```rust
//! use lutgrade_math::{lerp, saturate};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(saturate(1.5), 1.0);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` exactly when `t = 0.0` and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Formula
///
/// `a + (b - a) * t`
///
/// # Example
///
/// ```rust
/// use lutgrade_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps a value to [0, 1].
///
/// NaN maps to 0 so a bad sample can never index outside a lattice.
#[inline]
pub fn saturate(value: f32) -> f32 {
    if value > 0.0 {
        value.min(1.0)
    } else {
        0.0
    }
}
