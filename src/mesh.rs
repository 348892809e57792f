use crate::geometry::{round_tol, LineSegment, Point3D, Triangle, Vector3D, TOLERANCE};
use crate::host::RayHit;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("Failed to load mesh: {0}")]
    LoadError(String),

    #[error("Empty mesh")]
    EmptyMesh,

    #[error("Invalid wall dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid opening: {0}")]
    InvalidOpening(String),
}

/// Rectangular void through a wall.
///
/// `start`/`end` are distances along the wall centerline from its start
/// point, `bottom`/`top` heights above the centerline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub start: f64,
    pub end: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Opening {
    pub fn new(start: f64, end: f64, bottom: f64, top: f64) -> Self {
        Self {
            start,
            end,
            bottom,
            top,
        }
    }

    fn contains(&self, along: f64, up: f64) -> bool {
        along > self.start && along < self.end && up > self.bottom && up < self.top
    }
}

/// Triangulated faces of a host solid
#[derive(Debug, Clone)]
pub struct FaceMesh {
    pub triangles: Vec<Triangle>,
}

impl FaceMesh {
    /// Create a new face mesh from triangles
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        if triangles.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        Ok(Self { triangles })
    }

    /// Load faces from an STL file
    pub fn from_stl<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let mut file = std::fs::File::open(path)
            .map_err(|e| MeshError::LoadError(e.to_string()))?;

        let stl = stl_io::read_stl(&mut file)
            .map_err(|e| MeshError::LoadError(e.to_string()))?;

        let vertex = |index: usize| {
            let v = &stl.vertices[index];
            Point3D::new(v[0] as f64, v[1] as f64, v[2] as f64)
        };

        let triangles: Vec<Triangle> = stl
            .faces
            .iter()
            .map(|face| {
                Triangle::new(
                    vertex(face.vertices[0]),
                    vertex(face.vertices[1]),
                    vertex(face.vertices[2]),
                )
            })
            .collect();

        Self::new(triangles)
    }

    /// Both face planes of a straight wall with rectangular openings.
    ///
    /// The wall runs along `centerline`, rises `height` above it and is
    /// `thickness` deep, centred on the centerline along `normal`. Each face
    /// is cut into rectangular cells at every opening edge; cells whose
    /// centre lies inside an opening are left out.
    pub fn slab(
        centerline: &LineSegment,
        normal: &Vector3D,
        thickness: f64,
        height: f64,
        openings: &[Opening],
    ) -> Result<Self, MeshError> {
        let length = centerline.length();
        if !(length > 0.0 && thickness > 0.0 && height > 0.0)
            || !length.is_finite()
            || !thickness.is_finite()
            || !height.is_finite()
        {
            return Err(MeshError::InvalidDimensions(format!(
                "length {}, thickness {}, height {}",
                length, thickness, height
            )));
        }
        let normal_len = normal.norm();
        if !(normal_len > 0.0) || !normal_len.is_finite() {
            return Err(MeshError::InvalidDimensions(format!(
                "normal {:?} has no direction",
                normal
            )));
        }
        for opening in openings {
            if !(opening.start < opening.end && opening.bottom < opening.top) {
                return Err(MeshError::InvalidOpening(format!("{:?} is empty", opening)));
            }
        }

        let along = centerline.vector() / length;
        let across = normal / normal_len;
        let up = Vector3D::z();

        let us = breakpoints(length, openings.iter().flat_map(|o| [o.start, o.end]));
        let vs = breakpoints(height, openings.iter().flat_map(|o| [o.bottom, o.top]));

        let point = |u: f64, v: f64, w: f64| centerline.start + along * u + up * v + across * w;
        let half = thickness / 2.0;

        let mut triangles = Vec::new();
        for u in us.windows(2) {
            for v in vs.windows(2) {
                let (u0, u1, v0, v1) = (u[0], u[1], v[0], v[1]);
                let (uc, vc) = ((u0 + u1) / 2.0, (v0 + v1) / 2.0);
                if openings.iter().any(|o| o.contains(uc, vc)) {
                    continue;
                }
                for w in [-half, half] {
                    let (a, b) = (point(u0, v0, w), point(u1, v0, w));
                    let (c, d) = (point(u1, v1, w), point(u0, v1, w));
                    triangles.push(Triangle::new(a, b, c));
                    triangles.push(Triangle::new(a, c, d));
                }
            }
        }

        if triangles.is_empty() {
            return Err(MeshError::InvalidOpening(
                "openings remove the entire wall".to_string(),
            ));
        }

        Self::new(triangles)
    }

    /// Every face the ray crosses ahead of `origin`, nearest first.
    ///
    /// A ray through an edge shared by neighbouring triangles touches each
    /// of them at the same distance; those touches count as one crossing.
    pub fn cast_ray(&self, origin: &Point3D, direction: &Vector3D) -> Vec<RayHit> {
        let scale = direction.norm();
        let mut hits: Vec<RayHit> = self
            .triangles
            .iter()
            .filter_map(|tri| tri.intersect_ray(origin, direction))
            .map(|t| RayHit {
                point: *origin + direction * t,
                distance: t * scale,
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.dedup_by(|a, b| round_tol(a.distance) == round_tol(b.distance));
        hits
    }

    /// Number of triangles in mesh
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }
}

/// Sorted, deduplicated cut positions in `[0, extent]`
fn breakpoints(extent: f64, cuts: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = std::iter::once(0.0)
        .chain(std::iter::once(extent))
        .chain(cuts.map(|c| c.clamp(0.0, extent)))
        .collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
    values
}
