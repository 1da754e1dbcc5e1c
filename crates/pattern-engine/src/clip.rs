//! Clip volumes: a prism over the face boundary inset by the border
//! margin, used to trim cutters to a non-rectangular face.
//!
//! Alongside the kernel solid, a clip carries its own analytic region
//! (polygon or circle in the face frame plus a span along the normal).
//! The kernel's intersection operator reports no result when boundaries
//! do not cross, which is exactly the fully-contained and fully-outside
//! cases; the analytic region tells those two apart.

use kernel_bridge::{booleans, introspect, mesh, primitives, profiles, transforms, Solid};

use crate::frame::{FaceFrame, BOUNDARY_TOLERANCE};
use crate::offset;
use crate::pose;
use crate::types::{CutError, Diagnostics};

/// Clearance past the face on the outward side.
const ABOVE_FACE: f64 = 5.0;

/// Fraction of a cutter's volume that must survive the clip intersection
/// for whole-mode to keep it.
const WHOLE_VOLUME_RATIO: f64 = 0.99;

/// Slack for the analytic containment test.
const CONTAINS_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
enum ClipRegion {
    /// Circle of `radius` about the frame centre, in (u,v).
    Circle { radius: f64 },
    /// Arbitrary polygon in (u,v).
    Polygon(Vec<[f64; 2]>),
}

/// A face-derived clip: kernel solid plus the analytic region it was
/// built from.
#[derive(Debug, Clone)]
pub struct ClipVolume {
    pub solid: Solid,
    region: ClipRegion,
    frame: FaceFrame,
    depth: f64,
}

impl ClipVolume {
    /// Whether a world point lies inside the clip volume.
    fn contains(&self, p: [f64; 3]) -> bool {
        let d = [
            p[0] - self.frame.centre[0],
            p[1] - self.frame.centre[1],
            p[2] - self.frame.centre[2],
        ];
        let n = self.frame.normal;
        let along = d[0] * n[0] + d[1] * n[1] + d[2] * n[2];
        if along > ABOVE_FACE + CONTAINS_EPSILON
            || along < -(self.depth + ABOVE_FACE) - CONTAINS_EPSILON
        {
            return false;
        }
        let uv = self.frame.project(p);
        match &self.region {
            ClipRegion::Circle { radius } => {
                uv[0] * uv[0] + uv[1] * uv[1] <= (radius + CONTAINS_EPSILON).powi(2)
            }
            ClipRegion::Polygon(poly) => point_in_polygon(uv, poly),
        }
    }

    /// Whether every tessellation vertex of a solid lies inside the clip.
    fn contains_solid(&self, solid: &Solid) -> Result<bool, CutError> {
        let m = mesh::tessellate(solid, BOUNDARY_TOLERANCE)?;
        Ok(m
            .vertices
            .chunks(3)
            .all(|c| self.contains([c[0] as f64, c[1] as f64, c[2] as f64])))
    }

    /// Whether no tessellation vertex of a solid lies inside the clip.
    fn excludes_solid(&self, solid: &Solid) -> Result<bool, CutError> {
        let m = mesh::tessellate(solid, BOUNDARY_TOLERANCE)?;
        Ok(!m
            .vertices
            .chunks(3)
            .any(|c| self.contains([c[0] as f64, c[1] as f64, c[2] as f64])))
    }
}

fn point_in_polygon(p: [f64; 2], poly: &[[f64; 2]]) -> bool {
    // even-odd ray cast along +u
    let mut inside = false;
    let n = poly.len();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let t = (p[1] - a[1]) / (b[1] - a[1]);
            let x = a[0] + t * (b[0] - a[0]);
            if x > p[0] {
                inside = !inside;
            }
        }
    }
    inside
}

/// Build the clip volume for a face: its boundary inset by `border`,
/// extruded from `ABOVE_FACE` past the face down through `depth + ABOVE_FACE`,
/// so it contains every cutter volume.
pub fn build_clip(
    solid: &Solid,
    face_index: Option<usize>,
    frame: &FaceFrame,
    border: f64,
    depth: f64,
) -> Result<ClipVolume, CutError> {
    let span = depth + 2.0 * ABOVE_FACE;

    if let Some(index) = face_index {
        let samples = introspect::face_boundary_samples(solid, index, BOUNDARY_TOLERANCE)?;
        if let Some((centre, radius)) = introspect::classify_circle(&samples) {
            let inner = radius - border;
            if inner <= 0.0 {
                return Err(CutError::OffsetDegenerate {
                    reason: format!("border {border} swallows the circular face (r = {radius})"),
                });
            }
            let cylinder = primitives::cylinder(inner, span)?;
            let oriented = pose::orient_to_face(&cylinder, frame.dominant)?;
            let base = [
                centre[0] - (depth + ABOVE_FACE) * frame.normal[0],
                centre[1] - (depth + ABOVE_FACE) * frame.normal[1],
                centre[2] - (depth + ABOVE_FACE) * frame.normal[2],
            ];
            return Ok(ClipVolume {
                solid: transforms::translated(&oriented, base),
                region: ClipRegion::Circle { radius: inner },
                frame: frame.clone(),
                depth,
            });
        }

        let loop_pts = introspect::face_outer_loop(solid, index)?;
        let uv: Vec<[f64; 2]> = loop_pts.iter().map(|p| frame.project(*p)).collect();
        let inset = offset::offset_polygon(&uv, border)?;
        let prism = prism_over(frame, &inset, span)?;
        return Ok(ClipVolume {
            solid: prism,
            region: ClipRegion::Polygon(inset),
            frame: frame.clone(),
            depth,
        });
    }

    // Synthetic frame: the bounding-box rectangle inset by the border.
    let hu = frame.u_size / 2.0 - border;
    let hv = frame.v_size / 2.0 - border;
    if hu <= 0.0 || hv <= 0.0 {
        return Err(CutError::OffsetDegenerate {
            reason: "border leaves no usable region".to_string(),
        });
    }
    let rect = vec![[-hu, -hv], [hu, -hv], [hu, hv], [-hu, hv]];
    let prism = prism_over(frame, &rect, span)?;
    Ok(ClipVolume {
        solid: prism,
        region: ClipRegion::Polygon(rect),
        frame: frame.clone(),
        depth,
    })
}

fn prism_over(frame: &FaceFrame, uv: &[[f64; 2]], span: f64) -> Result<Solid, CutError> {
    let lifted: Vec<[f64; 3]> = uv
        .iter()
        .map(|&[u, v]| {
            let p = frame.point_at(u, v);
            [
                p[0] + ABOVE_FACE * frame.normal[0],
                p[1] + ABOVE_FACE * frame.normal[1],
                p[2] + ABOVE_FACE * frame.normal[2],
            ]
        })
        .collect();
    let sweep = [
        -span * frame.normal[0],
        -span * frame.normal[1],
        -span * frame.normal[2],
    ];
    Ok(profiles::polygon_prism(&lifted, sweep)?)
}

/// Whole-mode filter: keep only cutters whose intersection with the clip
/// volume retains (within 1 %) their full volume. When the kernel reports
/// no intersection at all, the analytic region decides between fully
/// inside (kept) and fully outside (discarded).
pub fn retain_whole(
    cutters: Vec<Solid>,
    clip: &ClipVolume,
) -> Result<(Vec<Solid>, usize), CutError> {
    let mut kept = Vec::with_capacity(cutters.len());
    let mut discarded = 0;
    for cutter in cutters {
        let keep = match booleans::common(&cutter, &clip.solid) {
            Ok(overlap) => {
                let full = mesh::volume(&cutter)?;
                mesh::volume(&overlap)? >= WHOLE_VOLUME_RATIO * full
            }
            Err(_) => clip.contains_solid(&cutter)?,
        };
        if keep {
            kept.push(cutter);
        } else {
            discarded += 1;
        }
    }
    Ok((kept, discarded))
}

/// Partial-mode intersection: trim every member against the clip volume.
///
/// Members entirely inside pass through untouched; members entirely
/// outside are dropped; a member the kernel cannot trim is kept unclipped
/// with a warning, so a failed clip never loses material it should have
/// cut.
pub fn clip_partial(
    members: Vec<Solid>,
    clip: &ClipVolume,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Solid>, CutError> {
    let mut out = Vec::with_capacity(members.len());
    for member in members {
        match booleans::common(&member, &clip.solid) {
            Ok(trimmed) => out.push(trimmed),
            Err(err) => {
                if clip.contains_solid(&member)? {
                    out.push(member);
                } else if clip.excludes_solid(&member)? {
                    // fully outside: nothing of it survives the clip
                } else {
                    diagnostics.warn(format!(
                        "clip intersection failed ({err}); keeping the cutter unclipped"
                    ));
                    out.push(member);
                }
            }
        }
    }
    Ok(out)
}
