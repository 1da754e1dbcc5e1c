//! Profile-to-prism builders: edges from points or arcs, wires from ordered
//! edges, a planar face from a closed wire, and extrusion into a prism.

use truck_modeling::builder;
use truck_modeling::geometry::{Curve, Line};
use truck_modeling::topology::{Edge, Wire};
use truck_modeling::{Point3, Vector3};

use crate::solid::Solid;
use crate::types::KernelError;

/// One segment of a closed planar profile, in world coordinates.
///
/// Consecutive segments must share endpoints and the last must close back to
/// the first; the builder reuses one vertex per junction so the resulting
/// wire is watertight.
#[derive(Debug, Clone, Copy)]
pub enum Seg {
    /// Straight segment.
    Line { start: [f64; 3], end: [f64; 3] },
    /// Circular arc from `start` to `end` passing through `transit`.
    Arc {
        start: [f64; 3],
        end: [f64; 3],
        transit: [f64; 3],
    },
}

impl Seg {
    fn start(&self) -> [f64; 3] {
        match self {
            Seg::Line { start, .. } | Seg::Arc { start, .. } => *start,
        }
    }

    fn end(&self) -> [f64; 3] {
        match self {
            Seg::Line { end, .. } | Seg::Arc { end, .. } => *end,
        }
    }
}

fn pt(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

const JOIN_TOLERANCE: f64 = 1e-9;

fn joined(a: [f64; 3], b: [f64; 3]) -> bool {
    (a[0] - b[0]).abs() < JOIN_TOLERANCE
        && (a[1] - b[1]).abs() < JOIN_TOLERANCE
        && (a[2] - b[2]).abs() < JOIN_TOLERANCE
}

/// Assemble a closed wire from ordered segments, sharing junction vertices.
pub(crate) fn closed_wire(segs: &[Seg]) -> Result<Wire, KernelError> {
    let n = segs.len();
    if n < 2 {
        return Err(KernelError::InvalidInput {
            reason: format!("profile needs at least 2 segments, got {n}"),
        });
    }
    for i in 0..n {
        let next = (i + 1) % n;
        if !joined(segs[i].end(), segs[next].start()) {
            return Err(KernelError::InvalidInput {
                reason: format!("profile segment {i} does not join segment {next}"),
            });
        }
    }

    let vertices: Vec<_> = segs.iter().map(|s| builder::vertex(pt(s.start()))).collect();
    let mut edges: Vec<Edge> = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let edge = match segs[i] {
            Seg::Line { start, end } => Edge::new(
                &vertices[i],
                &vertices[j],
                Curve::Line(Line(pt(start), pt(end))),
            ),
            Seg::Arc { transit, .. } => {
                builder::circle_arc(&vertices[i], &vertices[j], pt(transit))
            }
        };
        edges.push(edge);
    }
    Ok(Wire::from_iter(edges))
}

/// Build a prism: closed profile → planar face → translational sweep.
pub fn prism(segs: &[Seg], sweep: [f64; 3]) -> Result<Solid, KernelError> {
    let wire = closed_wire(segs)?;
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::BuilderFailed {
        op: "face",
        reason: format!("{e}"),
    })?;
    let solid = builder::tsweep(&face, Vector3::new(sweep[0], sweep[1], sweep[2]));
    Ok(Solid::new(solid))
}

/// Convenience: prism over a straight-edged polygon given its vertex loop.
pub fn polygon_prism(points: &[[f64; 3]], sweep: [f64; 3]) -> Result<Solid, KernelError> {
    if points.len() < 3 {
        return Err(KernelError::InvalidInput {
            reason: format!("polygon needs at least 3 vertices, got {}", points.len()),
        });
    }
    let segs: Vec<Seg> = (0..points.len())
        .map(|i| Seg::Line {
            start: points[i],
            end: points[(i + 1) % points.len()],
        })
        .collect();
    prism(&segs, sweep)
}
