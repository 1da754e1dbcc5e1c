//! Primitive solids on top of truck's sweep API.
//!
//! truck has no built-in box/cylinder — everything is successive sweeps.

use std::f64::consts::PI;

use truck_modeling::builder;
use truck_modeling::{EuclideanSpace, Point3, Rad, Vector3};

use crate::profiles;
use crate::solid::Solid;
use crate::types::KernelError;

fn positive(name: &'static str, value: f64) -> Result<f64, KernelError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(KernelError::InvalidInput {
            reason: format!("{name} must be positive, got {value}"),
        })
    }
}

/// Box solid centred on the Z axis, footprint `length × width` in XY,
/// extending from z = 0 to z = `height`.
pub fn cuboid(length: f64, width: f64, height: f64) -> Result<Solid, KernelError> {
    positive("length", length)?;
    positive("width", width)?;
    positive("height", height)?;

    let v = builder::vertex(Point3::new(-length / 2.0, -width / 2.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(length, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, width, 0.0));
    Ok(Solid::new(builder::tsweep(
        &face,
        Vector3::new(0.0, 0.0, height),
    )))
}

/// Cylinder along +Z: base circle centred at the origin, z ∈ [0, height].
pub fn cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    positive("radius", radius)?;
    positive("height", height)?;

    let v = builder::vertex(Point3::new(radius, 0.0, 0.0));
    let wire = builder::rsweep(&v, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::BuilderFailed {
        op: "circular face",
        reason: format!("{e}"),
    })?;
    Ok(Solid::new(builder::tsweep(
        &face,
        Vector3::new(0.0, 0.0, height),
    )))
}

/// Vertex loop of a regular n-gon in the XY plane at z = `z`, sized by the
/// distance between opposite flats, with one flat side horizontal at the
/// bottom.
pub fn regular_polygon_points(n_sides: u32, flat_to_flat: f64, z: f64) -> Vec<[f64; 3]> {
    let n = n_sides as f64;
    let apothem = flat_to_flat / 2.0;
    let circumradius = apothem / (PI / n).cos();
    (0..n_sides)
        .map(|k| {
            let theta = -PI / 2.0 + PI / n + (k as f64) * 2.0 * PI / n;
            [
                circumradius * theta.cos(),
                circumradius * theta.sin(),
                z,
            ]
        })
        .collect()
}

/// Regular n-sided prism along +Z, one flat side horizontal, built
/// wire → face → prism.
pub fn regular_prism(n_sides: u32, flat_to_flat: f64, height: f64) -> Result<Solid, KernelError> {
    if n_sides < 3 {
        return Err(KernelError::InvalidInput {
            reason: format!("regular prism needs at least 3 sides, got {n_sides}"),
        });
    }
    positive("flat_to_flat", flat_to_flat)?;
    positive("height", height)?;

    let points = regular_polygon_points(n_sides, flat_to_flat, 0.0);
    profiles::polygon_prism(&points, [0.0, 0.0, height])
}
