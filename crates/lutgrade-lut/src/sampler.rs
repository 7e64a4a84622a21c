//! LUT interpolation strategies.
//!
//! Every strategy starts from the same [`LatticeNeighborhood`]: the input
//! color is clamped to [0, 1], scaled into lattice units by `N - 1`, and
//! split into the enclosing integer corners plus a fractional offset.
//!
//! - [`Trilinear`] blends all 8 corners of the cell, z first, then y, then x.
//! - [`Tetrahedral`] picks one of the 6 tetrahedra that tile the cell and
//!   blends its 4 vertices with barycentric weights.
//! - [`Direct`] hands a texel-center coordinate to a [`TextureFilter`], the
//!   software stand-in for a GPU sampler.
//!
//! All three agree exactly on lattice points.

use std::sync::Arc;

use lutgrade_math::Vec3;

use crate::CubeVolume;

/// A strategy that reconstructs a graded color from a [`CubeVolume`].
pub trait LutSampler: Send + Sync {
    /// Samples `cube` at the (unclamped) source color `rgb`.
    fn sample(&self, cube: &CubeVolume, rgb: Vec3) -> Vec3;
}

/// The integer cell around a continuous lattice coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeNeighborhood {
    /// `floor(coord)` per axis.
    pub lower: [usize; 3],
    /// `ceil(coord)` per axis. Equal to `lower` on lattice-aligned axes.
    pub upper: [usize; 3],
    /// `coord - lower`, each component in [0, 1).
    pub frac: Vec3,
}

impl LatticeNeighborhood {
    /// Clamps `rgb` to [0, 1] and locates it in a lattice of dimension `size`.
    ///
    /// ```rust
    /// use lutgrade_lut::LatticeNeighborhood;
    /// use lutgrade_math::Vec3;
    ///
    /// let n = LatticeNeighborhood::new(Vec3::new(0.5, 1.5, -1.0), 5);
    /// assert_eq!(n.lower, [2, 4, 0]);
    /// assert_eq!(n.upper, [2, 4, 0]);
    /// ```
    #[inline]
    pub fn new(rgb: Vec3, size: usize) -> Self {
        let coord = rgb.clamp01() * (size - 1) as f32;
        let lower = coord.floor();
        let upper = coord.ceil();
        Self {
            lower: to_index(lower),
            upper: to_index(upper),
            frac: coord - lower,
        }
    }

    /// Per axis, `upper` where `mask` is set and `lower` elsewhere.
    #[inline]
    pub fn corner(&self, mask: [bool; 3]) -> [usize; 3] {
        [
            if mask[0] { self.upper[0] } else { self.lower[0] },
            if mask[1] { self.upper[1] } else { self.lower[1] },
            if mask[2] { self.upper[2] } else { self.lower[2] },
        ]
    }
}

#[inline]
fn to_index(v: Vec3) -> [usize; 3] {
    [v.x as usize, v.y as usize, v.z as usize]
}

/// Eight-corner trilinear interpolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trilinear;

impl LutSampler for Trilinear {
    fn sample(&self, cube: &CubeVolume, rgb: Vec3) -> Vec3 {
        let n = LatticeNeighborhood::new(rgb, cube.size());
        let [x0, y0, z0] = n.lower;
        let [x1, y1, z1] = n.upper;
        let f = n.frac;

        // z innermost, then y, then x. Reference output depends on this order.
        let c00 = cube.fetch(x0, y0, z0).lerp(cube.fetch(x0, y0, z1), f.z);
        let c01 = cube.fetch(x0, y1, z0).lerp(cube.fetch(x0, y1, z1), f.z);
        let c10 = cube.fetch(x1, y0, z0).lerp(cube.fetch(x1, y0, z1), f.z);
        let c11 = cube.fetch(x1, y1, z0).lerp(cube.fetch(x1, y1, z1), f.z);

        let c0 = c00.lerp(c01, f.y);
        let c1 = c10.lerp(c11, f.y);

        c0.lerp(c1, f.x)
    }
}

/// The tetrahedron of the unit cell containing a fractional offset.
///
/// Vertices are `lower`, `lower + first`, `lower + second` and `upper`,
/// where `first` and `second` are axis masks (one and two axes set).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetraCell {
    /// Axis of the largest fractional component.
    pub first: [bool; 3],
    /// Axes of the two largest fractional components.
    pub second: [bool; 3],
    /// Weights of `lower`, `first`, `second`, `upper`. Sum to 1.
    pub weights: [f32; 4],
}

#[inline]
fn mask_vec(mask: [bool; 3]) -> Vec3 {
    Vec3::select(mask, Vec3::ONE, Vec3::ZERO)
}

/// Selects the tetrahedron containing `frac` and its barycentric weights.
///
/// The cell is picked with the cyclic test `frac.xyz > frac.yzx`; its
/// complement `!compare1.zxy` breaks two-way ties. Weights are ratios of
/// parallelepiped volumes (triple products) against the edge vectors
/// `first`, `second` and `(1,1,1)` from the min corner.
///
/// ```rust
/// use lutgrade_lut::tetrahedral_weights;
/// use lutgrade_math::Vec3;
///
/// let cell = tetrahedral_weights(Vec3::new(0.5, 0.3, 0.1));
/// assert_eq!(cell.first, [true, false, false]);
/// assert_eq!(cell.second, [true, true, false]);
/// let sum: f32 = cell.weights.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-6);
/// ```
pub fn tetrahedral_weights(frac: Vec3) -> TetraCell {
    let compare1 = frac.gt(frac.yzx());
    let compare2 = [!compare1[2], !compare1[0], !compare1[1]];

    let mut first = [
        compare1[0] && compare2[0],
        compare1[1] && compare2[1],
        compare1[2] && compare2[2],
    ];
    let mut second = [
        compare1[0] || compare2[0],
        compare1[1] || compare2[1],
        compare1[2] || compare2[2],
    ];

    // Three-way tie: the point sits on the main diagonal, shared by all six
    // tetrahedra, and the cyclic test has no strict winner.
    if first == [false; 3] {
        first = [true, false, false];
        second = [true, true, false];
    }

    let e1 = mask_vec(first);
    let e2 = mask_vec(second);
    let e3 = Vec3::ONE;

    let volume = e1.triple(e2, e3);
    let w1 = frac.triple(e2, e3) / volume;
    let w2 = e1.triple(frac, e3) / volume;
    let w3 = e1.triple(e2, frac) / volume;

    TetraCell {
        first,
        second,
        weights: [1.0 - (w1 + w2 + w3), w1, w2, w3],
    }
}

/// Four-vertex tetrahedral interpolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tetrahedral;

impl LutSampler for Tetrahedral {
    fn sample(&self, cube: &CubeVolume, rgb: Vec3) -> Vec3 {
        let n = LatticeNeighborhood::new(rgb, cube.size());
        let cell = tetrahedral_weights(n.frac);
        let [w0, w1, w2, w3] = cell.weights;

        let c0 = cube.fetch_at(n.lower);
        let c1 = cube.fetch_at(n.corner(cell.first));
        let c2 = cube.fetch_at(n.corner(cell.second));
        let c3 = cube.fetch_at(n.upper);

        c0 * w0 + c1 * w1 + c2 * w2 + c3 * w3
    }
}

/// A filtered texture lookup over a [`CubeVolume`].
///
/// `uvw` is in normalized texture space: texel `i` is centered at
/// `(i + 0.5) / N`. Implementations model a GPU sampler with linear
/// filtering and clamp-to-edge addressing.
pub trait TextureFilter: Send + Sync {
    /// Filters `cube` at normalized texture coordinate `uvw`.
    fn filter(&self, cube: &CubeVolume, uvw: Vec3) -> Vec3;
}

impl<F: TextureFilter + ?Sized> TextureFilter for Arc<F> {
    #[inline]
    fn filter(&self, cube: &CubeVolume, uvw: Vec3) -> Vec3 {
        (**self).filter(cube, uvw)
    }
}

/// Full-precision software linear filter with clamp-to-edge addressing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearFilter;

impl TextureFilter for LinearFilter {
    fn filter(&self, cube: &CubeVolume, uvw: Vec3) -> Vec3 {
        let size = cube.size();
        let last = (size - 1) as f32;
        let t = uvw * size as f32 - Vec3::splat(0.5);
        let base = t.floor();
        let f = t - base;

        let lo = Vec3::new(
            base.x.clamp(0.0, last),
            base.y.clamp(0.0, last),
            base.z.clamp(0.0, last),
        );
        let hi = Vec3::new(
            (base.x + 1.0).clamp(0.0, last),
            (base.y + 1.0).clamp(0.0, last),
            (base.z + 1.0).clamp(0.0, last),
        );
        let [x0, y0, z0] = to_index(lo);
        let [x1, y1, z1] = to_index(hi);

        let c00 = cube.fetch(x0, y0, z0).lerp(cube.fetch(x0, y0, z1), f.z);
        let c01 = cube.fetch(x0, y1, z0).lerp(cube.fetch(x0, y1, z1), f.z);
        let c10 = cube.fetch(x1, y0, z0).lerp(cube.fetch(x1, y0, z1), f.z);
        let c11 = cube.fetch(x1, y1, z0).lerp(cube.fetch(x1, y1, z1), f.z);

        c00.lerp(c01, f.y).lerp(c10.lerp(c11, f.y), f.x)
    }
}

/// Hands the lookup to a texture filter in texel-center space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct<F> {
    /// The sampler doing the actual filtering.
    pub filter: F,
}

impl<F> Direct<F> {
    /// Wraps a texture filter.
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    /// Remaps a source color so lattice point `k / (N-1)` lands on the
    /// center of texel `k`: `(c - 0.5) * ((N-1)/N) + 0.5`.
    #[inline]
    pub fn texel_coord(rgb: Vec3, size: usize) -> Vec3 {
        let scale = (size - 1) as f32 / size as f32;
        (rgb.clamp01() - Vec3::splat(0.5)) * scale + Vec3::splat(0.5)
    }
}

impl<F: TextureFilter> LutSampler for Direct<F> {
    fn sample(&self, cube: &CubeVolume, rgb: Vec3) -> Vec3 {
        self.filter.filter(cube, Self::texel_coord(rgb, cube.size()))
    }
}
