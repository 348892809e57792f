// Host surface and the collaborator services the layout pipeline consumes
use crate::geometry::{LineSegment, Point3D, Vector3D, TOLERANCE};
use crate::rebar::LinearElement;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Failure reported by a host-side service
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("element query failed: {0}")]
    Query(String),

    #[error("curve projection failed: {0}")]
    Projection(String),

    #[error("ray cast failed: {0}")]
    RayCast(String),
}

/// Planar wall bounded by a straight centerline.
///
/// `centerline` runs along the wall at its base; its start point is the base
/// point every ordered set is measured from. `normal` is the wall's face
/// orientation and is the direction opening rays are cast along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSurface {
    pub centerline: LineSegment,
    pub normal: Vector3D,
}

impl HostSurface {
    pub fn new(centerline: LineSegment, normal: Vector3D) -> Self {
        Self { centerline, normal }
    }

    /// In-plane orientation used as the classification reference
    pub fn direction(&self) -> Vector3D {
        self.centerline.vector()
    }

    pub fn base_point(&self) -> Point3D {
        self.centerline.start
    }

    pub fn unit_normal(&self) -> Result<Vector3D> {
        let norm = self.normal.norm();
        if !norm.is_finite() || norm < TOLERANCE {
            return Err(Error::DegenerateGeometry(format!(
                "host normal {:?} has no usable direction",
                self.normal
            )));
        }
        Ok(self.normal / norm)
    }

    /// Reject hosts the pipeline cannot measure against
    pub fn validate(&self) -> Result<()> {
        if !self.centerline.is_finite() {
            return Err(Error::DegenerateGeometry(
                "host centerline has non-finite coordinates".to_string(),
            ));
        }
        if self.centerline.length() < TOLERANCE {
            return Err(Error::DegenerateGeometry(format!(
                "host centerline from {:?} to {:?} has zero length",
                self.centerline.start, self.centerline.end
            )));
        }
        self.unit_normal().map(|_| ())
    }
}

/// Intersection reported by a ray cast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Point3D,
    pub distance: f64,
}

/// Enumerates the reinforcement currently hosted by a surface
pub trait HostedElementSource {
    fn hosted_linear_elements(
        &self,
        host: &HostSurface,
    ) -> std::result::Result<Vec<LinearElement>, ServiceError>;
}

/// Nearest-point projection onto a host centerline
pub trait CurveProjector {
    fn project(
        &self,
        curve: &LineSegment,
        point: &Point3D,
    ) -> std::result::Result<Point3D, ServiceError>;
}

/// Directional ray test against a host's own faces
pub trait RayCaster {
    fn cast_ray(
        &self,
        host: &HostSurface,
        origin: &Point3D,
        direction: &Vector3D,
    ) -> std::result::Result<Vec<RayHit>, ServiceError>;
}

/// A single collaborator providing all three services
pub trait HostServices: HostedElementSource + CurveProjector + RayCaster {}

impl<T: HostedElementSource + CurveProjector + RayCaster> HostServices for T {}

/// Clamped nearest-point projection onto a straight centerline
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentProjector;

impl CurveProjector for SegmentProjector {
    fn project(
        &self,
        curve: &LineSegment,
        point: &Point3D,
    ) -> std::result::Result<Point3D, ServiceError> {
        if !point.iter().all(|c| c.is_finite()) {
            return Err(ServiceError::Projection(format!(
                "cannot project non-finite point {:?}",
                point
            )));
        }
        Ok(curve.closest_point(point))
    }
}
