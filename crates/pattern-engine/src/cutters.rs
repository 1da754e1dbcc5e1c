//! Template cutters, built at the origin in the XY plane and extending in
//! +Z by `depth + 1`.
//!
//! Every template is a single profile prism (lines and circular arcs), so
//! no boolean seams exist inside a cutter: a rounded rectangle is four
//! lines and four quarter arcs, a stadium line two lines and two half
//! arcs, a sheared rectangle a parallelogram.

use kernel_bridge::{primitives, profiles, Seg, Solid};
use knurl_types::{PatternSpec, ShapeKind};

use crate::types::CutError;

const MIN_SEGMENT: f64 = 1e-9;

/// Build the template cutter for a descriptor. `line_length` carries the
/// resolved length for line shapes and is ignored otherwise.
pub fn build_template(
    spec: &PatternSpec,
    line_length: f64,
    depth: f64,
) -> Result<Solid, CutError> {
    let height = depth + 1.0;
    if spec.width <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("width must be positive, got {}", spec.width),
        });
    }

    let solid = match spec.shape {
        ShapeKind::Line => line_template(spec, line_length, height)?,
        ShapeKind::Rect | ShapeKind::Square => rect_template(spec, height)?,
        ShapeKind::Circle => primitives::cylinder(spec.width / 2.0, height)?,
        ShapeKind::Polygon(n) => {
            let points = primitives::regular_polygon_points(n, spec.width, 0.0);
            profiles::polygon_prism(&points, [0.0, 0.0, height])?
        }
    };
    Ok(solid)
}

fn line_template(spec: &PatternSpec, length: f64, height: f64) -> Result<Solid, CutError> {
    let width = spec.width;
    if length <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("line length must be positive, got {length}"),
        });
    }
    if !spec.round_ends {
        let points = rect_points(length, width, 0.0);
        return Ok(profiles::polygon_prism(&points, [0.0, 0.0, height])?);
    }
    // Stadium: half-disks on both ends, clamped to a circle when the
    // length does not exceed the width.
    if length <= width {
        return Ok(primitives::cylinder(width / 2.0, height)?);
    }
    let r = width / 2.0;
    let flat = length / 2.0 - r;
    let segs = [
        Seg::Line {
            start: [-flat, -r, 0.0],
            end: [flat, -r, 0.0],
        },
        Seg::Arc {
            start: [flat, -r, 0.0],
            end: [flat, r, 0.0],
            transit: [length / 2.0, 0.0, 0.0],
        },
        Seg::Line {
            start: [flat, r, 0.0],
            end: [-flat, r, 0.0],
        },
        Seg::Arc {
            start: [-flat, r, 0.0],
            end: [-flat, -r, 0.0],
            transit: [-length / 2.0, 0.0, 0.0],
        },
    ];
    Ok(profiles::prism(&segs, [0.0, 0.0, height])?)
}

fn rect_template(spec: &PatternSpec, height: f64) -> Result<Solid, CutError> {
    let w = spec.width;
    let h = match spec.shape {
        ShapeKind::Square => spec.width,
        _ => spec.effective_height(),
    };
    if h <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("height must be positive, got {h}"),
        });
    }
    if spec.shear != 0.0 {
        if spec.shear.abs() >= 90.0 {
            return Err(CutError::InvalidInput {
                reason: format!("shear must be within ±90 degrees, got {}", spec.shear),
            });
        }
        let points = rect_points(w, h, h * spec.shear.to_radians().tan());
        return Ok(profiles::polygon_prism(&points, [0.0, 0.0, height])?);
    }
    if spec.fillet > 0.0 {
        let r = spec.fillet.min(w / 2.0).min(h / 2.0);
        let segs = rounded_rect_segs(w, h, r);
        return Ok(profiles::prism(&segs, [0.0, 0.0, height])?);
    }
    let points = rect_points(w, h, 0.0);
    Ok(profiles::polygon_prism(&points, [0.0, 0.0, height])?)
}

/// Rectangle (or parallelogram for `skew` ≠ 0) centred on the origin.
fn rect_points(w: f64, h: f64, skew: f64) -> Vec<[f64; 3]> {
    vec![
        [-w / 2.0 - skew / 2.0, -h / 2.0, 0.0],
        [w / 2.0 - skew / 2.0, -h / 2.0, 0.0],
        [w / 2.0 + skew / 2.0, h / 2.0, 0.0],
        [-w / 2.0 + skew / 2.0, h / 2.0, 0.0],
    ]
}

/// Rounded-rectangle profile: straight runs joined by quarter arcs, with
/// zero-length runs elided when the radius swallows a side.
fn rounded_rect_segs(w: f64, h: f64, r: f64) -> Vec<Seg> {
    let hw = w / 2.0;
    let hh = h / 2.0;
    let c = r * std::f64::consts::FRAC_1_SQRT_2;

    let mut segs = Vec::with_capacity(8);
    let push_line = |segs: &mut Vec<Seg>, start: [f64; 3], end: [f64; 3]| {
        let len = ((end[0] - start[0]).powi(2) + (end[1] - start[1]).powi(2)).sqrt();
        if len > MIN_SEGMENT {
            segs.push(Seg::Line { start, end });
        }
    };

    // counter-clockwise from the right side
    push_line(
        &mut segs,
        [hw, -(hh - r), 0.0],
        [hw, hh - r, 0.0],
    );
    segs.push(Seg::Arc {
        start: [hw, hh - r, 0.0],
        end: [hw - r, hh, 0.0],
        transit: [hw - r + c, hh - r + c, 0.0],
    });
    push_line(
        &mut segs,
        [hw - r, hh, 0.0],
        [-(hw - r), hh, 0.0],
    );
    segs.push(Seg::Arc {
        start: [-(hw - r), hh, 0.0],
        end: [-hw, hh - r, 0.0],
        transit: [-(hw - r) - c, hh - r + c, 0.0],
    });
    push_line(
        &mut segs,
        [-hw, hh - r, 0.0],
        [-hw, -(hh - r), 0.0],
    );
    segs.push(Seg::Arc {
        start: [-hw, -(hh - r), 0.0],
        end: [-(hw - r), -hh, 0.0],
        transit: [-(hw - r) - c, -(hh - r) - c, 0.0],
    });
    push_line(
        &mut segs,
        [-(hw - r), -hh, 0.0],
        [hw - r, -hh, 0.0],
    );
    segs.push(Seg::Arc {
        start: [hw - r, -hh, 0.0],
        end: [hw, -(hh - r), 0.0],
        transit: [hw - r + c, -(hh - r) - c, 0.0],
    });
    segs
}
