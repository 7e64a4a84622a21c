//! # lutgrade-math
//!
//! Math primitives for the color grading pipeline.
//!
//! - [`Vec3`] - RGB triplets and lattice coordinates
//! - Scalar helpers with shader semantics ([`lerp`], [`saturate`])
//!
//! # Usage
//!
//! ```rust
//! use lutgrade_math::{Vec3, lerp};
//!
//! let a = Vec3::new(0.2, 0.4, 0.6);
//! let b = Vec3::splat(1.0);
//! let mid = a.lerp(b, 0.5);
//! assert_eq!(mid.x, lerp(0.2, 1.0, 0.5));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Vector math backing [`Vec3`]
//!
//! # Used By
//!
//! - `lutgrade-lut` - Lattice math and interpolation
//! - `lutgrade-ops` - Dithering and blending

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod vec3;

pub use interp::*;
pub use vec3::*;
