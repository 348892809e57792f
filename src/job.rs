// JSON job files describing a wall to lay out
use crate::geometry::{LineSegment, Point3D, Vector3D};
use crate::host::HostSurface;
use crate::mesh::{FaceMesh, Opening};
use crate::placement::PlacementConfig;
use crate::rebar::LinearElement;
use crate::wall::WallModel;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Wall geometry section of a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallGeometry {
    pub start: Point3D,
    pub end: Point3D,
    pub normal: Vector3D,

    #[serde(default)]
    pub thickness: f64,

    #[serde(default)]
    pub height: f64,

    #[serde(default)]
    pub openings: Vec<Opening>,

    /// Face mesh to use instead of a generated slab
    #[serde(default)]
    pub stl: Option<PathBuf>,
}

/// A complete layout job: one wall, its bars and the layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub wall: WallGeometry,

    #[serde(default)]
    pub bars: Vec<LinearElement>,

    #[serde(default)]
    pub config: PlacementConfig,
}

impl Job {
    /// Load a job from a JSON file; a relative `stl` path is taken relative
    /// to the job file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut job: Job = serde_json::from_str(&contents)?;

        if let (Some(stl), Some(dir)) = (job.wall.stl.as_mut(), path.parent()) {
            if stl.is_relative() {
                *stl = dir.join(&*stl);
            }
        }

        log::info!("Loaded job {:?}: {} bar sets", path, job.bars.len());
        Ok(job)
    }

    pub fn host(&self) -> HostSurface {
        HostSurface::new(
            LineSegment::new(self.wall.start, self.wall.end),
            self.wall.normal,
        )
    }

    /// Build the in-memory wall and hand back the layout settings
    pub fn into_wall(self) -> Result<(WallModel, PlacementConfig)> {
        let host = self.host();
        let wall = match &self.wall.stl {
            Some(stl) => {
                log::info!("Loading wall faces from {:?}", stl);
                WallModel::new(host, self.bars, FaceMesh::from_stl(stl)?)
            }
            None => WallModel::slab(
                host,
                self.wall.thickness,
                self.wall.height,
                &self.wall.openings,
                self.bars,
            )?,
        };
        Ok((wall, self.config))
    }
}
