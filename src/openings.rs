// Discard candidates that fall over openings in the host
use crate::geometry::Point3D;
use crate::host::{HostSurface, RayCaster};
use crate::{Error, Result};

/// Keep the candidates whose ray along the host normal strikes host material.
///
/// Each ray starts `backoff` unit normals behind its candidate so it never
/// begins on a face. A cast with zero hits marks an opening and drops the
/// candidate; a failing cast aborts the whole filter.
pub fn filter_openings<C>(
    host: &HostSurface,
    caster: &C,
    candidates: Vec<Point3D>,
    backoff: f64,
) -> Result<Vec<Point3D>>
where
    C: RayCaster + ?Sized,
{
    check_backoff(backoff)?;

    let direction = host.unit_normal()?;
    let offset = direction * backoff;

    let mut retained = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let origin = candidate - offset;
        let hits = caster.cast_ray(host, &origin, &direction)?;

        if hits.is_empty() {
            log::debug!("Candidate {:?} lies over an opening", candidate);
        } else {
            retained.push(candidate);
        }
    }

    Ok(retained)
}

/// A ray origin in front of the host faces would see nothing, so the
/// back-off must be finite and non-negative.
pub fn check_backoff(backoff: f64) -> Result<()> {
    if !(backoff.is_finite() && backoff >= 0.0) {
        return Err(Error::DegenerateGeometry(format!(
            "ray back-off {} must be finite and non-negative",
            backoff
        )));
    }
    Ok(())
}
