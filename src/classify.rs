// Vertical / horizontal classification of hosted bars
//
// "Vertical" and "horizontal" are relative to the host's in-plane
// orientation, not to gravity.
use crate::geometry::{round_tol, Vector3D};
use crate::rebar::LinearElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Hosted bars split by orientation
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub vertical: Vec<LinearElement>,
    pub horizontal: Vec<LinearElement>,
    /// Bars matching neither rule; dropped without diagnostics
    pub unclassified: usize,
}

/// Classify a bar direction `v` against the reference orientation.
///
/// Vertical: `v.z != 0` and `v · reference == 0`, both exact.
/// Horizontal: `v.z == 0` and `v` parallel to `reference` in plan, compared
/// after rounding. Zero, non-finite and oblique directions yield `None`.
pub fn classify_direction(v: &Vector3D, reference: &Vector3D) -> Option<Orientation> {
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }
    if v.iter().all(|&c| round_tol(c) == 0.0) {
        return None;
    }

    if v.z != 0.0 {
        return (v.dot(reference) == 0.0).then_some(Orientation::Vertical);
    }

    let axis_aligned = (round_tol(v.x) == 0.0 && round_tol(reference.x) == 0.0)
        || (round_tol(v.y) == 0.0 && round_tol(reference.y) == 0.0);
    if axis_aligned {
        return Some(Orientation::Horizontal);
    }

    // A zero reference component not caught above divides to inf/NaN
    let ratio_x = (v.x / reference.x).abs();
    let ratio_y = (v.y / reference.y).abs();
    if !ratio_x.is_finite() || !ratio_y.is_finite() {
        return None;
    }

    (round_tol(ratio_x) == round_tol(ratio_y)).then_some(Orientation::Horizontal)
}

/// Partition hosted bars into vertical and horizontal sets.
pub fn classify_elements(reference: &Vector3D, elements: Vec<LinearElement>) -> Classification {
    let mut result = Classification::default();

    for element in elements {
        let orientation = element
            .direction()
            .and_then(|direction| classify_direction(&direction, reference));

        match orientation {
            Some(Orientation::Vertical) => result.vertical.push(element),
            Some(Orientation::Horizontal) => result.horizontal.push(element),
            None => {
                log::debug!(
                    "Dropping unclassified bar with direction {:?}",
                    element.direction()
                );
                result.unclassified += 1;
            }
        }
    }

    result
}
