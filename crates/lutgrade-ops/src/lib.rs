//! # lutgrade-ops
//!
//! Real-time LUT grading stage with gamma-aware ordered dithering.
//!
//! # Modules
//!
//! - [`pipeline`] - [`GradePipeline`]: LUT lookup, intensity/chroma/luma blend, dither
//! - [`dither`] - 8-bit ordered dithering in a gamma-warped domain
//! - [`noise`] - Tileable threshold field ([`NoiseField`])
//! - [`config`] - Typed, YAML-loadable parameters ([`GradeConfig`])
//! - [`frame`] - Whole-frame processing over interleaved buffers
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lutgrade_lut::{CubeVolume, SampleMode};
//! use lutgrade_ops::{GradeConfig, GradePipeline, NoiseField};
//!
//! let mut config = GradeConfig::default();
//! config.blend.sample_mode = SampleMode::Tetrahedral;
//! config.blend.intensity = 0.75;
//!
//! let look = CubeVolume::from_fn(33, |[r, g, b]| [r * 0.9, g, (b * 1.1).min(1.0)]).unwrap();
//! let pipeline = GradePipeline::new(
//!     Arc::new(look),
//!     Arc::new(NoiseField::bayer(8).unwrap()),
//!     config,
//! );
//!
//! let frame = vec![0.5f32; 4 * 4 * 4];
//! let graded = pipeline.apply_frame_u8(&frame, 4, 4, 4).unwrap();
//! assert_eq!(graded[3], 255);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod config;
pub mod dither;
pub mod frame;
pub mod noise;
pub mod pipeline;

pub use config::{BlendParameters, GradeConfig};
pub use dither::{DitherParameters, Ditherer};
pub use error::{OpsError, OpsResult};
pub use noise::NoiseField;
pub use pipeline::GradePipeline;
