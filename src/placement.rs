use crate::classify::classify_elements;
use crate::geometry::{Point3D, Vector3D};
use crate::grid::synthesize_grid;
use crate::host::{CurveProjector, HostServices, HostSurface, HostedElementSource, RayCaster};
use crate::layers::extract_layers;
use crate::openings::{check_backoff, filter_openings};
use crate::pairing::pair_vertical_elements;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for pin layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Multiple of the unit host normal the ray origin is backed off by
    pub ray_backoff: f64,

    /// Offset from a computed insertion point to the template pin's own
    /// placement origin
    pub template_offset: Vector3D,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            ray_backoff: 5.0,
            template_offset: Vector3D::zeros(),
        }
    }
}

impl PlacementConfig {
    /// Offset derived from the template pin's bounding box: half its extent
    /// back along X and Y, half its height up along Z.
    pub fn from_template_bounds(min: &Point3D, max: &Point3D) -> Self {
        Self {
            template_offset: Vector3D::new(
                (min.x - max.x) / 2.0,
                (min.y - max.y) / 2.0,
                (max.z - min.z) / 2.0,
            ),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_backoff(self.ray_backoff)?;
        if !self.template_offset.iter().all(|c| c.is_finite()) {
            return Err(Error::DegenerateGeometry(format!(
                "template offset {:?} is not finite",
                self.template_offset
            )));
        }
        Ok(())
    }
}

/// A pin ready to be created by the host application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinPlacement {
    /// Computed point between paired bars at a layer elevation
    pub insertion_point: Point3D,
    /// `insertion_point + template_offset`
    pub origin: Point3D,
    /// Pin X axis: the host normal
    pub x_axis: Vector3D,
    /// Pin Y axis: straight down
    pub y_axis: Vector3D,
}

/// Stage-by-stage counts of one layout run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub vertical: usize,
    pub horizontal: usize,
    pub unclassified: usize,
    pub pairs: usize,
    pub unpaired: usize,
    pub midpoints: usize,
    pub layers: usize,
    pub candidates: usize,
    pub retained: usize,
}

#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub points: Vec<Point3D>,
    pub report: LayoutReport,
}

/// Main pin layout pipeline
pub struct PinLayout {
    config: PlacementConfig,
}

impl PinLayout {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Run classification, pairing, layering, grid synthesis and opening
    /// filtering for one host (main entry point).
    ///
    /// Any service failure aborts the run; nothing partial is returned.
    pub fn run<S, P, C>(
        &self,
        host: &HostSurface,
        source: &S,
        projector: &P,
        caster: &C,
    ) -> Result<LayoutOutcome>
    where
        S: HostedElementSource + ?Sized,
        P: CurveProjector + ?Sized,
        C: RayCaster + ?Sized,
    {
        host.validate()?;
        self.config.validate()?;

        let elements = source.hosted_linear_elements(host)?;
        log::info!("Host carries {} bar sets", elements.len());

        let classification = classify_elements(&host.direction(), elements);
        log::info!(
            "Classified: {} vertical, {} horizontal, {} unclassified",
            classification.vertical.len(),
            classification.horizontal.len(),
            classification.unclassified
        );

        let pairing = pair_vertical_elements(&host.centerline, &classification.vertical, projector)?;
        log::info!(
            "Paired {} vertical positions into {} midpoints ({} unpaired)",
            pairing.pairs * 2,
            pairing.midpoints.len(),
            pairing.unpaired
        );

        let layers = extract_layers(&host.base_point(), &classification.horizontal);
        log::info!("Found {} elevation layers", layers.len());

        let candidates = synthesize_grid(&pairing.midpoints, &layers);
        let candidate_count = candidates.len();
        log::info!("Synthesized {} staggered candidates", candidate_count);

        let points = filter_openings(host, caster, candidates, self.config.ray_backoff)?;
        log::info!(
            "Retained {} of {} candidates after opening test",
            points.len(),
            candidate_count
        );

        let report = LayoutReport {
            vertical: classification.vertical.len(),
            horizontal: classification.horizontal.len(),
            unclassified: classification.unclassified,
            pairs: pairing.pairs,
            unpaired: pairing.unpaired,
            midpoints: pairing.midpoints.len(),
            layers: layers.len(),
            candidates: candidate_count,
            retained: points.len(),
        };

        Ok(LayoutOutcome { points, report })
    }

    /// [`PinLayout::run`] against a single collaborator providing every service
    pub fn run_with<H>(&self, host: &HostSurface, services: &H) -> Result<LayoutOutcome>
    where
        H: HostServices + ?Sized,
    {
        self.run(host, services, services, services)
    }

    /// Insertion points only
    pub fn insertion_points<H>(&self, host: &HostSurface, services: &H) -> Result<Vec<Point3D>>
    where
        H: HostServices + ?Sized,
    {
        Ok(self.run_with(host, services)?.points)
    }

    /// Insertion points wrapped into pin frames
    pub fn placements<H>(&self, host: &HostSurface, services: &H) -> Result<Vec<PinPlacement>>
    where
        H: HostServices + ?Sized,
    {
        let points = self.insertion_points(host, services)?;
        self.frame(host, &points)
    }

    /// Frame computed insertion points for creation
    pub fn frame(&self, host: &HostSurface, points: &[Point3D]) -> Result<Vec<PinPlacement>> {
        let x_axis = host.unit_normal()?;
        let y_axis = -Vector3D::z();

        Ok(points
            .iter()
            .map(|&insertion_point| PinPlacement {
                insertion_point,
                origin: insertion_point + self.config.template_offset,
                x_axis,
                y_axis,
            })
            .collect())
    }
}

impl Default for PinLayout {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}
