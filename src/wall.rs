use crate::geometry::{LineSegment, Point3D, PointKey, Vector3D};
use crate::host::{
    CurveProjector, HostSurface, HostedElementSource, RayCaster, RayHit, SegmentProjector,
    ServiceError,
};
use crate::mesh::{FaceMesh, Opening};
use crate::rebar::LinearElement;
use crate::Result;

/// In-memory wall: a host surface, the bars it hosts and its face mesh.
///
/// Serves every collaborator the layout pipeline needs, so a wall modelled
/// outside a host application can be laid out directly.
#[derive(Debug, Clone)]
pub struct WallModel {
    pub host: HostSurface,
    pub bars: Vec<LinearElement>,
    pub faces: FaceMesh,
}

impl WallModel {
    pub fn new(host: HostSurface, bars: Vec<LinearElement>, faces: FaceMesh) -> Self {
        Self { host, bars, faces }
    }

    /// Rectangular wall generated from its centerline, thickness and height
    pub fn slab(
        host: HostSurface,
        thickness: f64,
        height: f64,
        openings: &[Opening],
        bars: Vec<LinearElement>,
    ) -> Result<Self> {
        let faces = FaceMesh::slab(&host.centerline, &host.normal, thickness, height, openings)?;
        log::debug!(
            "Generated wall faces: {} triangles, {} openings",
            faces.num_triangles(),
            openings.len()
        );
        Ok(Self::new(host, bars, faces))
    }

    fn is_host(&self, host: &HostSurface) -> bool {
        PointKey::from_point(&host.centerline.start) == PointKey::from_point(&self.host.centerline.start)
            && PointKey::from_point(&host.centerline.end) == PointKey::from_point(&self.host.centerline.end)
    }
}

impl HostedElementSource for WallModel {
    fn hosted_linear_elements(
        &self,
        host: &HostSurface,
    ) -> std::result::Result<Vec<LinearElement>, ServiceError> {
        if !self.is_host(host) {
            return Err(ServiceError::Query(format!(
                "no wall modelled along {:?} -> {:?}",
                host.centerline.start, host.centerline.end
            )));
        }
        Ok(self.bars.clone())
    }
}

impl CurveProjector for WallModel {
    fn project(
        &self,
        curve: &LineSegment,
        point: &Point3D,
    ) -> std::result::Result<Point3D, ServiceError> {
        SegmentProjector.project(curve, point)
    }
}

impl RayCaster for WallModel {
    fn cast_ray(
        &self,
        host: &HostSurface,
        origin: &Point3D,
        direction: &Vector3D,
    ) -> std::result::Result<Vec<RayHit>, ServiceError> {
        if !self.is_host(host) {
            return Err(ServiceError::RayCast(format!(
                "no faces modelled for wall along {:?} -> {:?}",
                host.centerline.start, host.centerline.end
            )));
        }
        Ok(self.faces.cast_ray(origin, direction))
    }
}
