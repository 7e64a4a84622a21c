//! # lutgrade-lut
//!
//! 3D lookup tables for real-time color grading.
//!
//! A [`CubeVolume`] stores the graded color at every point of an `N³`
//! lattice over the unit RGB cube. Between lattice points the color is
//! reconstructed by one of three [`LutSampler`] strategies, selected with
//! [`SampleMode`]:
//!
//! - [`Trilinear`] - 8-corner blend, smooth but softens fine LUT detail
//! - [`Tetrahedral`] - 4-vertex blend, preserves linearity per tetrahedron
//! - [`Direct`] - delegates to a texture sampler ([`TextureFilter`])
//!
//! # Usage
//!
//! ```rust
//! use lutgrade_lut::{CubeVolume, SampleMode};
//! use lutgrade_math::Vec3;
//!
//! let cube = CubeVolume::identity(33);
//! let rgb = SampleMode::Tetrahedral.sampler().sample(&cube, Vec3::new(0.5, 0.3, 0.2));
//! assert!((rgb.x - 0.5).abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`lutgrade-math`] - Vector math
//! - [`thiserror`] - Error handling
//! - [`serde`] - Config representation of [`SampleMode`]
//!
//! # Used By
//!
//! - `lutgrade-ops` - The grading pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod mode;
pub mod sampler;
mod volume;

pub use error::{LutError, LutResult};
pub use mode::SampleMode;
pub use sampler::{
    tetrahedral_weights, Direct, LatticeNeighborhood, LinearFilter, LutSampler, TetraCell,
    Tetrahedral, TextureFilter, Trilinear,
};
pub use volume::CubeVolume;
