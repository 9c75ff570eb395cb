//! Plain geometric value types shared by items, containers and the space
//! model: dimensions, positions and the six axis-aligned rotations of a box.
//!
//! Everything here is representation-agnostic floating point; [`crate::space`]
//! is the one place that rounds down to an integer centimeter grid.

use serde::{Deserialize, Serialize};

/// Width (x), depth (y) and height (z) of a box, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: f64,
    pub d: f64,
    pub h: f64,
}

impl Dimensions {
    pub fn new(w: f64, d: f64, h: f64) -> Self {
        Dimensions { w, d, h }
    }

    pub fn volume(&self) -> f64 {
        self.w * self.d * self.h
    }

    pub fn is_positive(&self) -> bool {
        self.w > 0.0 && self.d > 0.0 && self.h > 0.0
    }

    pub fn fits_within(&self, bounds: &Dimensions) -> bool {
        self.w <= bounds.w && self.d <= bounds.d && self.h <= bounds.h
    }

    /// The six axis-aligned permutations of `(w, d, h)`, in the order the
    /// placement engine tries them. Order is fixed so that ties between
    /// otherwise-equal rotations resolve the same way on every run.
    pub fn rotations(&self) -> [Dimensions; 6] {
        let (w, d, h) = (self.w, self.d, self.h);
        [
            Dimensions::new(w, d, h),
            Dimensions::new(w, h, d),
            Dimensions::new(d, w, h),
            Dimensions::new(d, h, w),
            Dimensions::new(h, w, d),
            Dimensions::new(h, d, w),
        ]
    }

    /// True if `self` is some permutation of `native`'s three dimensions
    /// (invariant 5: the rotation tuple is always a permutation of the
    /// item's native dimensions).
    pub fn is_permutation_of(&self, native: &Dimensions) -> bool {
        let mut a = [self.w, self.d, self.h];
        let mut b = [native.w, native.d, native.h];
        a.sort_by(|x, y| x.partial_cmp(y).expect("dimensions are finite, comparable f64s"));
        b.sort_by(|x, y| x.partial_cmp(y).expect("dimensions are finite, comparable f64s"));
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }
}

/// The minimum corner of a placed box, in container-local coordinates.
/// `x` is width (left to right), `y` is depth (front `0` to back), `z` is
/// height (bottom to top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// An axis-aligned bounding box: minimum corner plus dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Position,
    pub dims: Dimensions,
}

impl Aabb {
    pub fn new(min: Position, dims: Dimensions) -> Self {
        Aabb { min, dims }
    }

    pub fn max_x(&self) -> f64 {
        self.min.x + self.dims.w
    }

    pub fn max_y(&self) -> f64 {
        self.min.y + self.dims.d
    }

    pub fn max_z(&self) -> f64 {
        self.min.z + self.dims.h
    }

    /// True if `self` lies entirely inside `[0,0,0), bounds)`.
    pub fn within_bounds(&self, bounds: &Dimensions) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.min.z >= 0.0
            && self.max_x() <= bounds.w
            && self.max_y() <= bounds.d
            && self.max_z() <= bounds.h
    }

    /// Open-interval overlap test on the x-range with `other`.
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max_x() && other.min.x < self.max_x()
    }

    /// Open-interval overlap test on the z-range with `other`.
    pub fn overlaps_z(&self, other: &Aabb) -> bool {
        self.min.z < other.max_z() && other.min.z < self.max_z()
    }

    /// Open-interval overlap test on all three axes (invariant 3).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_z(other) && self.min.y < other.max_y() && other.min.y < self.max_y()
    }
}
