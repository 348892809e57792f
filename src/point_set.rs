use crate::geometry::{round_tol, Point3D, PointKey};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, HashSet};

/// Deduplicating point collection iterated by distance from a base point.
///
/// Membership is decided by [`PointKey`], so two distinct points that happen
/// to be equidistant from the base (e.g. mirrored across the centerline) are
/// both kept. Distance only drives iteration order; ties fall back to the
/// lexicographic key order. The first point inserted for a key wins.
#[derive(Debug, Clone)]
pub struct OrderedPointSet {
    base: Point3D,
    keys: HashSet<PointKey>,
    ordered: BTreeMap<(OrderedFloat<f64>, PointKey), Point3D>,
}

impl OrderedPointSet {
    pub fn new(base: Point3D) -> Self {
        Self {
            base,
            keys: HashSet::new(),
            ordered: BTreeMap::new(),
        }
    }

    /// Insert a point; returns false if a coincident point is already present
    pub fn insert(&mut self, point: Point3D) -> bool {
        let key = PointKey::from_point(&point);
        if !self.keys.insert(key) {
            return false;
        }
        let distance = round_tol((point - self.base).norm());
        self.ordered.insert((OrderedFloat(distance), key), point);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3D> {
        self.ordered.values()
    }

    pub fn into_vec(self) -> Vec<Point3D> {
        self.ordered.into_values().collect()
    }
}

impl Extend<Point3D> for OrderedPointSet {
    fn extend<I: IntoIterator<Item = Point3D>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}
