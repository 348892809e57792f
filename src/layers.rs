use crate::geometry::Point3D;
use crate::point_set::OrderedPointSet;
use crate::rebar::LinearElement;

/// Distinct elevations carried by horizontal bar positions.
///
/// Each position contributes the Z of its anchor plus offset. Elevations are
/// deduplicated under the shared tolerance and ordered by distance of
/// `(0, 0, z)` from `base`, which for a base on Z = 0 near the origin is
/// ascending height.
pub fn extract_layers(base: &Point3D, horizontal: &[LinearElement]) -> Vec<f64> {
    let mut layers = OrderedPointSet::new(*base);
    layers.extend(
        horizontal
            .iter()
            .flat_map(LinearElement::position_points)
            .map(|point| Point3D::new(0.0, 0.0, point.z)),
    );

    layers.iter().map(|point| point.z).collect()
}
