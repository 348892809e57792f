// Pairing of vertical bars that share a projection on the host centerline
use crate::geometry::{LineSegment, Point3D, PointKey};
use crate::host::{CurveProjector, ServiceError};
use crate::point_set::OrderedPointSet;
use crate::rebar::LinearElement;

/// Midpoints between matched vertical bars, ordered by distance from the
/// centerline start
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    pub midpoints: Vec<Point3D>,
    /// Pairs consumed; coincident midpoints merge, so this can exceed `midpoints.len()`
    pub pairs: usize,
    pub unpaired: usize,
}

/// A flattened bar position together with its projection keys
#[derive(Debug, Clone, Copy)]
struct Candidate {
    point: Point3D,
    point_key: PointKey,
    projection_key: PointKey,
}

/// Greedy first-found pairing of vertical bar positions.
///
/// Each remaining candidate is matched with the first later candidate whose
/// centerline projection coincides in plan, skipping partners at the same 3D
/// location. Unmatched candidates are dropped. O(n²); which partner wins
/// among several equally valid ones depends on input order.
pub fn pair_vertical_elements<P>(
    centerline: &LineSegment,
    vertical: &[LinearElement],
    projector: &P,
) -> Result<Pairing, ServiceError>
where
    P: CurveProjector + ?Sized,
{
    let mut pending = vertical
        .iter()
        .flat_map(LinearElement::position_points)
        .map(|point| -> Result<Candidate, ServiceError> {
            let projection = projector.project(centerline, &point)?;
            Ok(Candidate {
                point,
                point_key: PointKey::from_point(&point),
                projection_key: PointKey::planar(&projection),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut midpoints = OrderedPointSet::new(centerline.start);
    let mut pairs = 0;
    let mut unpaired = 0;

    while !pending.is_empty() {
        let first = pending[0];

        let partner = pending
            .iter()
            .skip(1)
            .position(|other| {
                other.projection_key == first.projection_key && other.point_key != first.point_key
            })
            .map(|offset| offset + 1);

        match partner {
            Some(index) => {
                let other = pending.remove(index);
                midpoints.insert(midpoint_on_base(&first.point, &other.point));
                pairs += 1;
            }
            None => {
                log::debug!("Vertical bar position {:?} left unpaired", first.point);
                unpaired += 1;
            }
        }

        pending.remove(0);
    }

    Ok(Pairing {
        midpoints: midpoints.into_vec(),
        pairs,
        unpaired,
    })
}

/// Arithmetic mean in plan, dropped to Z = 0
fn midpoint_on_base(a: &Point3D, b: &Point3D) -> Point3D {
    Point3D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, 0.0)
}
