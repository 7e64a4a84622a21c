//! End-to-end grading properties.
//!
//! Covers the guarantees hosts rely on: lattice exactness, the two-level
//! dither output, neutral blend settings and the identity round trip.

use std::io::Write;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use lutgrade_lut::{CubeVolume, LutSampler, SampleMode, Tetrahedral, Trilinear};
use lutgrade_math::Vec3;
use lutgrade_ops::dither::{dither, quantize_levels};
use lutgrade_ops::{GradeConfig, GradePipeline, NoiseField, OpsError};

// ============================================================================
// Fixtures
// ============================================================================

/// A strongly non-linear look so that every stage has a visible effect.
fn teal_orange(size: usize) -> CubeVolume {
    CubeVolume::from_fn(size, |[r, g, b]| {
        let l = 0.2126 * r + 0.7152 * g + 0.0722 * b;
        [
            (r * 1.1 + 0.05 * l).min(1.0),
            g * 0.95 + 0.02,
            (b * (1.0 - l) + 0.1).min(1.0),
        ]
    })
    .unwrap()
}

fn ramp_noise() -> NoiseField {
    let data = (0..64 * 64).map(|i| ((i * 37) % 4096) as f32 / 4096.0).collect();
    NoiseField::from_f32(64, 64, data).unwrap()
}

fn pipeline(cube: CubeVolume, config: GradeConfig) -> GradePipeline {
    GradePipeline::new(Arc::new(cube), Arc::new(ramp_noise()), config)
}

/// Sample colors kept away from 8-bit level boundaries.
const SAMPLES: [[f32; 3]; 5] = [
    [100.3 / 255.0, 40.7 / 255.0, 200.3 / 255.0],
    [12.6 / 255.0, 180.4 / 255.0, 66.3 / 255.0],
    [250.2 / 255.0, 128.6 / 255.0, 3.7 / 255.0],
    [77.7 / 255.0, 77.3 / 255.0, 77.6 / 255.0],
    [0.0, 33.4 / 255.0, 150.6 / 255.0],
];

fn assert_vec_eq(a: Vec3, b: Vec3, eps: f32) {
    assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
    assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
    assert_abs_diff_eq!(a.z, b.z, epsilon = eps);
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn lattice_diagonal_is_exact() {
    let cube = teal_orange(33);
    for k in 0..33 {
        let c = Vec3::splat(k as f32 / 32.0);
        assert_eq!(Trilinear.sample(&cube, c), cube.fetch(k, k, k));
        assert_eq!(Tetrahedral.sample(&cube, c), cube.fetch(k, k, k));
    }
}

#[test]
fn modes_agree_on_cell_corners_and_differ_inside() {
    let cube = teal_orange(9);
    for corner in [[2, 3, 4], [3, 3, 4], [2, 4, 5], [3, 4, 5]] {
        let c = Vec3::new(
            corner[0] as f32 / 8.0,
            corner[1] as f32 / 8.0,
            corner[2] as f32 / 8.0,
        );
        assert_eq!(Trilinear.sample(&cube, c), Tetrahedral.sample(&cube, c));
    }
    let inside = Vec3::new(2.3 / 8.0, 3.6 / 8.0, 4.45 / 8.0);
    let a = Trilinear.sample(&cube, inside);
    let b = Tetrahedral.sample(&cube, inside);
    assert!((a - b).length() > 1e-6);
}

#[test]
fn every_mode_is_identity_on_identity_cube() {
    let cube = CubeVolume::identity(33);
    for mode in SampleMode::ALL {
        let sampler = mode.sampler();
        for s in SAMPLES {
            let rgb = Vec3::from_array(s);
            assert_vec_eq(sampler.sample(&cube, rgb), rgb, 1e-5);
        }
    }
}

// ============================================================================
// Dithering
// ============================================================================

#[test]
fn dither_disabled_is_identity() {
    for s in SAMPLES {
        let rgb = Vec3::from_array(s);
        assert_eq!(dither(rgb, 4.0, 0.5, false), rgb);
    }
}

#[test]
fn dither_picks_bracketing_levels() {
    let noise = ramp_noise();
    for s in SAMPLES {
        let rgb = Vec3::from_array(s);
        let (low, high) = quantize_levels(rgb);
        for (x, y) in [(0, 0), (5, 9), (63, 63), (100, 7)] {
            let out = dither(rgb, 2.2, noise.sample(x, y), true);
            for c in 0..3 {
                assert!(out[c] == low[c] || out[c] == high[c]);
            }
        }
    }
}

#[test]
fn dither_zero_noise_rounds_up() {
    for s in SAMPLES {
        let rgb = Vec3::from_array(s);
        let (low, high) = quantize_levels(rgb);
        let out = dither(rgb, 2.2, 0.0, true);
        for c in 0..3 {
            let expected = if rgb[c] == low[c] { low[c] } else { high[c] };
            assert_eq!(out[c], expected);
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn zero_intensity_returns_dithered_source() {
    let mut config = GradeConfig::default();
    config.blend.intensity = 0.0;
    let p = pipeline(teal_orange(33), config);
    for (i, s) in SAMPLES.iter().enumerate() {
        let src = Vec3::from_array(*s);
        let (x, y) = (i * 3, i * 11);
        let rgba = p.apply(src, x, y);
        let expected = dither(src, 2.2, p.noise().sample(x, y), true);
        assert_vec_eq(Vec3::new(rgba[0], rgba[1], rgba[2]), expected, 1e-6);
    }
}

#[test]
fn zero_chroma_and_luma_ignore_lut() {
    let mut config = GradeConfig::default();
    config.blend.chroma_amount = 0.0;
    config.blend.luma_amount = 0.0;
    config.blend.sample_mode = SampleMode::Tetrahedral;
    let p = pipeline(teal_orange(17), config);
    for (i, s) in SAMPLES.iter().enumerate() {
        let src = Vec3::from_array(*s);
        let rgba = p.apply(src, i, 2 * i);
        let expected = dither(src, 2.2, p.noise().sample(i, 2 * i), true);
        assert_vec_eq(Vec3::new(rgba[0], rgba[1], rgba[2]), expected, 1e-6);
    }
}

#[test]
fn identity_round_trip_without_dither() {
    for mode in SampleMode::ALL {
        let mut config = GradeConfig::default();
        config.dither.enabled = false;
        config.blend.sample_mode = mode;
        let p = pipeline(CubeVolume::identity(33), config);
        for s in SAMPLES {
            let src = Vec3::from_array(s);
            let rgba = p.apply(src, 1, 1);
            assert_vec_eq(Vec3::new(rgba[0], rgba[1], rgba[2]), src, 1e-5);
            assert_eq!(rgba[3], 1.0);
        }
    }
}

#[test]
fn frame_output_is_deterministic() {
    let p = pipeline(teal_orange(33), GradeConfig::default());
    let (w, h) = (70, 9);
    let src: Vec<f32> = (0..w * h * 3).map(|i| (i % 97) as f32 / 96.0).collect();
    let a = p.apply_frame_u8(&src, w, h, 3).unwrap();
    let b = p.apply_frame_u8(&src, w, h, 3).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "dither:\n  enabled: false\n  gamma: 1.8\nblend:\n  intensity: 0.6\n  sample_mode: tetrahedral"
    )
    .unwrap();

    let config = GradeConfig::from_file(file.path()).unwrap();
    assert!(!config.dither.enabled);
    assert_eq!(config.dither.gamma, 1.8);
    assert_eq!(config.blend.intensity, 0.6);
    assert_eq!(config.blend.chroma_amount, 1.0);
    assert_eq!(config.blend.sample_mode, SampleMode::Tetrahedral);
}

#[test]
fn config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GradeConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, OpsError::Io(_)));
}
