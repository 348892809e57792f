// Core modules for staggered pin placement over wall reinforcement
pub mod geometry;
pub mod rebar;
pub mod host;
pub mod point_set;
pub mod classify;
pub mod pairing;
pub mod layers;
pub mod grid;
pub mod openings;
pub mod placement;
pub mod mesh;
pub mod wall;
pub mod job;

// Re-export commonly used types
pub use geometry::{LineSegment, Point3D, PointKey, Triangle, Vector3D, TOLERANCE, TOLERANCE_DIGITS};
pub use host::{
    CurveProjector, HostServices, HostSurface, HostedElementSource, RayCaster, RayHit,
    SegmentProjector, ServiceError,
};
pub use job::Job;
pub use mesh::{FaceMesh, MeshError, Opening};
pub use placement::{LayoutOutcome, LayoutReport, PinLayout, PinPlacement, PlacementConfig};
pub use rebar::LinearElement;
pub use wall::WallModel;

/// Main result type for pin layout
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pin layout
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Host service failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Job file error: {0}")]
    Json(#[from] serde_json::Error),
}
