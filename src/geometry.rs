use nalgebra::{Point3, Vector3};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// 3D point type
pub type Point3D = Point3<f64>;

/// 3D vector type
pub type Vector3D = Vector3<f64>;

/// Decimal digits every coordinate is rounded to before an equality test.
///
/// Classification, pairing and layer deduplication all go through this one
/// constant so they agree on what "coincident" means.
pub const TOLERANCE_DIGITS: i32 = 10;

const ROUNDING_SCALE: f64 = 10u64.pow(TOLERANCE_DIGITS as u32) as f64;

/// Smallest length treated as nonzero: one unit in the last rounded digit.
pub const TOLERANCE: f64 = 1.0 / ROUNDING_SCALE;

/// Round a scalar to [`TOLERANCE_DIGITS`] decimal places.
pub fn round_tol(value: f64) -> f64 {
    (value * ROUNDING_SCALE).round() / ROUNDING_SCALE
}

/// Discretized point key (handles floating point comparison)
///
/// Two points share a key iff all their coordinates agree after rounding to
/// [`TOLERANCE_DIGITS`]. Ordering is lexicographic over (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey {
    x: OrderedFloat<f64>,
    y: OrderedFloat<f64>,
    z: OrderedFloat<f64>,
}

impl PointKey {
    pub fn from_point(point: &Point3D) -> Self {
        Self {
            x: discretize(point.x),
            y: discretize(point.y),
            z: discretize(point.z),
        }
    }

    /// Key over X and Y only; Z collapses to zero.
    pub fn planar(point: &Point3D) -> Self {
        Self {
            x: discretize(point.x),
            y: discretize(point.y),
            z: OrderedFloat(0.0),
        }
    }
}

// Adding +0.0 folds -0.0 into +0.0 so both hash alike
fn discretize(value: f64) -> OrderedFloat<f64> {
    OrderedFloat(round_tol(value) + 0.0)
}

/// Line segment in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point3D,
    pub end: Point3D,
}

impl LineSegment {
    pub fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unnormalized vector from start to end
    pub fn vector(&self) -> Vector3D {
        self.end - self.start
    }

    /// Nearest point on the segment, clamped to its endpoints.
    /// Zero-length segments project everything onto `start`.
    pub fn closest_point(&self, point: &Point3D) -> Point3D {
        let ab = self.vector();
        let length_sq = ab.norm_squared();
        if length_sq < TOLERANCE * TOLERANCE {
            return self.start;
        }
        let t = ((*point - self.start).dot(&ab) / length_sq).clamp(0.0, 1.0);
        self.start + ab * t
    }

    pub fn is_finite(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|c| c.is_finite())
    }
}

/// Triangle defined by three vertices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Point3D,
    pub v1: Point3D,
    pub v2: Point3D,
}

impl Triangle {
    pub fn new(v0: Point3D, v1: Point3D, v2: Point3D) -> Self {
        Self { v0, v1, v2 }
    }

    /// Möller–Trumbore ray intersection.
    /// Returns the ray parameter `t > 0` of the hit, edges inclusive.
    pub fn intersect_ray(&self, origin: &Point3D, direction: &Vector3D) -> Option<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let p = direction.cross(&edge2);
        let det = edge1.dot(&p);

        // Ray parallel to the triangle plane
        if det.abs() < 1e-15 {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = *origin - self.v0;
        let u = s.dot(&p) * inv_det;
        if !(-1e-12..=1.0 + 1e-12).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = direction.dot(&q) * inv_det;
        if v < -1e-12 || u + v > 1.0 + 1e-12 {
            return None;
        }

        let t = edge2.dot(&q) * inv_det;
        (t > 1e-12).then_some(t)
    }
}
