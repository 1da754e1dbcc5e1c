//! The border engine: cut out the interior of a face, leaving a frame of
//! fixed width along its boundary.

use std::time::Instant;

use kernel_bridge::{booleans, introspect, mesh, primitives, profiles, transforms, Solid};
use knurl_types::BorderSpec;
use shape_ops::Workpiece;

use crate::frame::{FaceFrame, BOUNDARY_TOLERANCE};
use crate::offset;
use crate::pose;
use crate::types::{CutError, CutResult, Diagnostics};

/// Clearance past the face so the cutter cap never sits on the target
/// surface.
const ABOVE_FACE: f64 = 1.0;

/// Tolerance for treating an offset quad as axis-aligned.
const AXIS_EPSILON: f64 = 1e-9;

/// Remove the interior of the selected face (or the +Z face of the
/// bounding box), leaving a frame `spec.width` wide.
pub fn execute_border(target: &Workpiece, spec: &BorderSpec) -> Result<CutResult, CutError> {
    if !spec.width.is_finite() || spec.width <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("border width must be positive, got {}", spec.width),
        });
    }
    if let Some(depth) = spec.depth {
        if depth <= 0.0 {
            return Err(CutError::InvalidInput {
                reason: format!("depth must be positive, got {depth}"),
            });
        }
    }
    let started = Instant::now();
    let mut diagnostics = Diagnostics::default();

    let face_index = target.selected_face();
    let frame = match face_index {
        Some(index) => FaceFrame::for_face(target.solid(), index)?,
        None => FaceFrame::synthetic_top(target.solid())?,
    };

    let bbox = mesh::bounding_box(target.solid())?;
    let height_along_normal = bbox.size()[frame.dominant.axis_index()];
    let depth = spec.depth.unwrap_or(height_along_normal + 2.0);

    let cutter = build_cutter(target.solid(), face_index, &frame, spec.width, depth)?;
    let cut = booleans::cut(target.solid(), &cutter)?;
    diagnostics.kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok(CutResult {
        workpiece: target.with_solid(cut),
        diagnostics,
    })
}

fn build_cutter(
    solid: &Solid,
    face_index: Option<usize>,
    frame: &FaceFrame,
    width: f64,
    depth: f64,
) -> Result<Solid, CutError> {
    if let Some(index) = face_index {
        // Circular face: a plain inset cylinder, no polygon offset needed.
        let samples = introspect::face_boundary_samples(solid, index, BOUNDARY_TOLERANCE)?;
        if let Some((centre, radius)) = introspect::classify_circle(&samples) {
            if radius > width {
                let cylinder = primitives::cylinder(radius - width, 2.0 * depth)?;
                let oriented = pose::orient_to_face(&cylinder, frame.dominant)?;
                let base = [
                    centre[0] - depth * frame.normal[0],
                    centre[1] - depth * frame.normal[1],
                    centre[2] - depth * frame.normal[2],
                ];
                return Ok(transforms::translated(&oriented, base));
            }
            // fall through to the polygon path, which will report the
            // boundary as unusable
        }
    }

    let uv: Vec<[f64; 2]> = match face_index {
        Some(index) => introspect::face_outer_loop(solid, index)?
            .iter()
            .map(|p| frame.project(*p))
            .collect(),
        None => {
            let hu = frame.u_size / 2.0;
            let hv = frame.v_size / 2.0;
            vec![[-hu, -hv], [hu, -hv], [hu, hv], [-hu, hv]]
        }
    };

    let inset = offset::offset_polygon(&uv, width)?;

    if let Some(rect) = axis_aligned_rect(&inset) {
        // Axis-aligned quad: a box over its bounding rectangle, spanning
        // depth on both sides of the face.
        let [[min_u, min_v], [max_u, max_v]] = rect;
        let corners = [
            [min_u, min_v],
            [max_u, min_v],
            [max_u, max_v],
            [min_u, max_v],
        ];
        return prism_from(frame, &corners, depth, depth);
    }

    // General polygon: assemble the offset loop and extrude through the
    // solid from just above the face.
    prism_from(frame, &inset, ABOVE_FACE, depth)
}

/// `Some((min, max))` when a 4-vertex loop runs parallel to the frame axes.
fn axis_aligned_rect(polygon: &[[f64; 2]]) -> Option<[[f64; 2]; 2]> {
    if polygon.len() != 4 {
        return None;
    }
    for i in 0..4 {
        let a = polygon[i];
        let b = polygon[(i + 1) % 4];
        if (a[0] - b[0]).abs() > AXIS_EPSILON && (a[1] - b[1]).abs() > AXIS_EPSILON {
            return None;
        }
    }
    let us: Vec<f64> = polygon.iter().map(|p| p[0]).collect();
    let vs: Vec<f64> = polygon.iter().map(|p| p[1]).collect();
    let min = [
        us.iter().cloned().fold(f64::MAX, f64::min),
        vs.iter().cloned().fold(f64::MAX, f64::min),
    ];
    let max = [
        us.iter().cloned().fold(f64::MIN, f64::max),
        vs.iter().cloned().fold(f64::MIN, f64::max),
    ];
    Some([min, max])
}

/// Prism over `uv` points, from `above` past the face down through `depth`.
fn prism_from(
    frame: &FaceFrame,
    uv: &[[f64; 2]],
    above: f64,
    depth: f64,
) -> Result<Solid, CutError> {
    let lifted: Vec<[f64; 3]> = uv
        .iter()
        .map(|&[u, v]| {
            let p = frame.point_at(u, v);
            [
                p[0] + above * frame.normal[0],
                p[1] + above * frame.normal[1],
                p[2] + above * frame.normal[2],
            ]
        })
        .collect();
    let span = above + depth;
    let sweep = [
        -span * frame.normal[0],
        -span * frame.normal[1],
        -span * frame.normal[2],
    ];
    Ok(profiles::polygon_prism(&lifted, sweep)?)
}
