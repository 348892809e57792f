use crate::geometry::{LineSegment, Point3D, Vector3D};
use serde::{Deserialize, Serialize};

/// A reinforcement bar set hosted by a wall.
///
/// `centerline` holds the bar's centerline curve segments in their drawn
/// order. `positions` holds one offset per repeated bar instance along the
/// set's driving direction; every instance shares the same shape and
/// direction as the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearElement {
    pub centerline: Vec<LineSegment>,

    #[serde(default = "single_position")]
    pub positions: Vec<Vector3D>,
}

fn single_position() -> Vec<Vector3D> {
    vec![Vector3D::zeros()]
}

impl LinearElement {
    pub fn new(centerline: Vec<LineSegment>, positions: Vec<Vector3D>) -> Self {
        Self {
            centerline,
            positions,
        }
    }

    /// A single bar instance along one straight segment
    pub fn straight(start: Point3D, end: Point3D) -> Self {
        Self::new(vec![LineSegment::new(start, end)], single_position())
    }

    pub fn with_positions(mut self, positions: Vec<Vector3D>) -> Self {
        self.positions = positions;
        self
    }

    /// endpoint(1) - endpoint(0) of the first centerline segment
    pub fn direction(&self) -> Option<Vector3D> {
        self.centerline.first().map(LineSegment::vector)
    }

    /// Start of the first centerline segment
    pub fn anchor(&self) -> Option<Point3D> {
        self.centerline.first().map(|segment| segment.start)
    }

    /// Anchor translated by every position offset, in position order
    pub fn position_points(&self) -> Vec<Point3D> {
        match self.anchor() {
            Some(anchor) => self.positions.iter().map(|offset| anchor + *offset).collect(),
            None => Vec::new(),
        }
    }

    pub fn num_positions(&self) -> usize {
        self.positions.len()
    }
}
