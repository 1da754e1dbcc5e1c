//! The pattern engine: descriptor → positioned cutters → fused set →
//! optional clip → batch subtraction.
//!
//! A call either returns the new solid value or leaves the caller's input
//! untouched behind an error; the only silently-recovered conditions are
//! a failed partial-clip offset (treated as `clip = none`) and a failed
//! fuse (compound fallback), both recorded as warnings.

use std::time::Instant;

use kernel_bridge::{booleans, mesh};
use knurl_types::{ClipMode, PatternSpec, ShapeKind};
use shape_ops::Workpiece;

use crate::clip;
use crate::cutters;
use crate::frame::FaceFrame;
use crate::layout;
use crate::pose;
use crate::types::{CutError, CutResult, Diagnostics};

fn validate(spec: &PatternSpec) -> Result<(), CutError> {
    if !spec.width.is_finite() || spec.width <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("width must be positive, got {}", spec.width),
        });
    }
    if spec.fillet < 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("fillet must not be negative, got {}", spec.fillet),
        });
    }
    if let Some(depth) = spec.depth {
        if depth <= 0.0 {
            return Err(CutError::InvalidInput {
                reason: format!("depth must be positive, got {depth}"),
            });
        }
    }
    if let Some(height) = spec.height {
        if height <= 0.0 {
            return Err(CutError::InvalidInput {
                reason: format!("height must be positive, got {height}"),
            });
        }
    }
    Ok(())
}

/// Cut a pattern into the selected face of `target` (or the +Z face of
/// its bounding box when nothing is selected).
pub fn execute_pattern(target: &Workpiece, spec: &PatternSpec) -> Result<CutResult, CutError> {
    validate(spec)?;
    let started = Instant::now();
    let mut diagnostics = Diagnostics::default();

    let face_index = target.selected_face();
    let frame = match face_index {
        Some(index) => FaceFrame::for_face(target.solid(), index)?,
        None => FaceFrame::synthetic_top(target.solid())?,
    };

    let bbox = mesh::bounding_box(target.solid())?;
    let depth = spec.depth.unwrap_or_else(|| bbox.max_extent() + 2.0);

    // Clip volume, when requested. A degenerate offset downgrades to
    // clip = none with a warning; anything else is a real failure.
    let clip_volume = if spec.clip != ClipMode::None {
        match clip::build_clip(target.solid(), face_index, &frame, spec.border, depth) {
            Ok(volume) => Some(volume),
            Err(CutError::OffsetDegenerate { reason }) => {
                diagnostics.warn(format!(
                    "clip volume offset failed ({reason}); continuing without clipping"
                ));
                None
            }
            Err(other) => return Err(other),
        }
    } else {
        None
    };

    // Tile positions and the template they all share.
    let is_line = spec.shape == ShapeKind::Line;
    let (positions, template, line_angle) = if is_line {
        let lines = layout::line_layout(spec, frame.u_size, frame.v_size)?;
        if lines.positions.is_empty() {
            diagnostics.warn("usable region is empty; nothing to cut".to_string());
            return Ok(CutResult {
                workpiece: target.clone(),
                diagnostics,
            });
        }
        let template = cutters::build_template(spec, lines.length, depth)?;
        (lines.positions, template, lines.angle)
    } else {
        let grid = layout::grid_positions(spec, frame.u_size, frame.v_size)?;
        if grid.is_empty() {
            diagnostics.warn("usable region is empty; nothing to cut".to_string());
            return Ok(CutResult {
                workpiece: target.clone(),
                diagnostics,
            });
        }
        let template = cutters::build_template(spec, 0.0, depth)?;
        (grid, template, 0.0)
    };

    let local_rotation = spec.rotation + line_angle;
    let quarter_turn = is_line && frame.dominant.is_x();
    let mut placed = Vec::with_capacity(positions.len());
    for uv in positions {
        placed.push(pose::place_cutter(
            &template,
            &frame,
            uv,
            depth,
            local_rotation,
            quarter_turn,
        )?);
    }

    // Whole-mode: discard every cutter not entirely inside the clip.
    if spec.clip == ClipMode::Whole {
        if let Some(ref volume) = clip_volume {
            let (kept, discarded) = clip::retain_whole(placed, volume)?;
            if discarded > 0 {
                diagnostics.warn(format!("discarded {discarded} cutters outside the face"));
            }
            if kept.is_empty() {
                diagnostics.warn("no cutter lies entirely inside the face".to_string());
                return Ok(CutResult {
                    workpiece: target.clone(),
                    diagnostics,
                });
            }
            placed = kept;
        }
    }

    // Fuse the kept cutters; a failed fuse degrades to a compound.
    let outcome = booleans::fuse_all(placed)?;
    if outcome.fell_back {
        diagnostics.warn("cutter fuse failed; continuing with a compound of cutters".to_string());
    }
    let mut tools = outcome.fused;

    // Partial-mode: trim the fused set against the clip volume.
    if spec.clip == ClipMode::Partial {
        if let Some(ref volume) = clip_volume {
            let members = clip::clip_partial(tools.into_members(), volume, &mut diagnostics)?;
            if members.is_empty() {
                diagnostics.warn("clipping removed every cutter".to_string());
                return Ok(CutResult {
                    workpiece: target.clone(),
                    diagnostics,
                });
            }
            tools = booleans::Fused::Compound(members);
        }
    }

    let cut = booleans::cut_all(target.solid(), &tools)?;
    diagnostics.kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok(CutResult {
        workpiece: target.with_solid(cut),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonsense_dimensions() {
        let target = Workpiece::cuboid(10.0, 10.0, 5.0).unwrap();
        let spec = PatternSpec {
            width: 0.0,
            ..PatternSpec::default()
        };
        assert!(matches!(
            execute_pattern(&target, &spec),
            Err(CutError::InvalidInput { .. })
        ));

        let spec = PatternSpec {
            width: 1.0,
            depth: Some(-2.0),
            ..PatternSpec::default()
        };
        assert!(matches!(
            execute_pattern(&target, &spec),
            Err(CutError::InvalidInput { .. })
        ));
    }

    #[test]
    fn empty_layout_returns_the_input_with_a_warning() {
        let target = Workpiece::cuboid(10.0, 10.0, 5.0).unwrap().faces(">Z");
        let spec = PatternSpec {
            shape: ShapeKind::Circle,
            width: 2.0,
            border: 20.0,
            ..PatternSpec::default()
        };
        let result = execute_pattern(&target, &spec).unwrap();
        assert!(!result.diagnostics.warnings.is_empty());
        let before = target.bounding_box().unwrap();
        let after = result.workpiece.bounding_box().unwrap();
        assert_eq!(before.min, after.min);
        assert_eq!(before.max, after.max);
    }

    #[test]
    fn shallow_line_pattern_cuts_grooves() {
        // grip lines across a small plate
        let target = Workpiece::cuboid(20.0, 12.0, 5.0).unwrap().faces(">Z");
        let spec = PatternSpec {
            width: 1.0,
            spacing: Some(2.0),
            depth: Some(0.5),
            border: 2.0,
            ..PatternSpec::default()
        };
        let before = target.volume().unwrap();
        let result = execute_pattern(&target, &spec).unwrap();
        let after = result.workpiece.volume().unwrap();

        // lines: floor((12 - 4) / 3) + 1 = 3, each 16 x 1 x 0.5
        let removed = 3.0 * 16.0 * 1.0 * 0.5;
        assert!(
            (before - after - removed).abs() < 0.5,
            "removed {} expected {removed}",
            before - after
        );

        // a through-less cut keeps the footprint
        let bb = result.workpiece.bounding_box().unwrap();
        assert!((bb.size()[0] - 20.0).abs() < 1e-6);
        assert!((bb.size()[1] - 12.0).abs() < 1e-6);
        assert!((bb.size()[2] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn through_cut_circles_pierce_the_plate() {
        let target = Workpiece::cuboid(12.0, 12.0, 3.0).unwrap().faces(">Z");
        let spec = PatternSpec {
            shape: ShapeKind::Circle,
            width: 3.0,
            spacing: Some(5.0),
            border: 2.0,
            ..PatternSpec::default()
        };
        let before = target.volume().unwrap();
        let result = execute_pattern(&target, &spec).unwrap();
        let after = result.workpiece.volume().unwrap();

        // usable 8 x 8, cell 8 => 2 x 2 holes of r = 1.5 through 3 mm
        let hole = std::f64::consts::PI * 1.5 * 1.5 * 3.0;
        let removed = 4.0 * hole;
        assert!(
            ((before - after) - removed).abs() / removed < 0.05,
            "removed {} expected {removed}",
            before - after
        );
    }

    #[test]
    fn determinism_same_inputs_same_volume() {
        let target = Workpiece::cuboid(15.0, 10.0, 4.0).unwrap().faces(">Z");
        let spec = PatternSpec {
            shape: ShapeKind::Square,
            width: 2.0,
            depth: Some(1.0),
            ..PatternSpec::default()
        };
        let a = execute_pattern(&target, &spec).unwrap();
        let b = execute_pattern(&target, &spec).unwrap();
        assert_eq!(
            a.workpiece.volume().unwrap(),
            b.workpiece.volume().unwrap()
        );
    }
}
