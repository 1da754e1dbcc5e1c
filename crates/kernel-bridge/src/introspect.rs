//! Read-only topology queries: face/edge enumeration with geometric
//! samples, ordered boundary loops, tolerance-sampled boundary polylines,
//! and circle classification of face boundaries.
//!
//! Faces and edges are addressed by their position in a stable enumeration
//! order (shells in order, entities in iteration order, edges deduplicated),
//! which holds for an unchanged solid.

use std::collections::HashSet;

use truck_modeling::geometry::Surface;
use truck_modeling::topology::Face;
use truck_modeling::InnerSpace;

use crate::solid::Solid;
use crate::types::KernelError;

/// Geometric sample of one face.
#[derive(Debug, Clone)]
pub struct FaceInfo {
    pub index: usize,
    /// Average of the boundary vertex positions.
    pub centroid: [f64; 3],
    /// Outward unit normal; `None` for non-planar faces.
    pub normal: Option<[f64; 3]>,
    pub planar: bool,
}

/// Geometric sample of one edge.
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    pub index: usize,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub midpoint: [f64; 3],
    /// Unit chord direction; `None` for closed or degenerate edges.
    pub direction: Option<[f64; 3]>,
    pub length: f64,
}

fn face_centroid(face: &Face) -> [f64; 3] {
    let mut c = [0.0; 3];
    let mut count = 0.0;
    for wire in face.boundaries() {
        for v in wire.vertex_iter() {
            let p = v.point();
            c[0] += p[0];
            c[1] += p[1];
            c[2] += p[2];
            count += 1.0;
        }
    }
    if count > 0.0 {
        [c[0] / count, c[1] / count, c[2] / count]
    } else {
        c
    }
}

/// Enumerate the faces of a solid with centroid, normal, and planarity.
pub fn face_infos(solid: &Solid) -> Vec<FaceInfo> {
    let mut infos = Vec::new();
    let mut index = 0;
    for shell in solid.inner.boundaries().iter() {
        for face in shell.face_iter() {
            let surface = face.oriented_surface();
            let (normal, planar) = match &surface {
                Surface::Plane(plane) => {
                    let n = plane.normal();
                    let len = n.magnitude();
                    if len > 1e-12 {
                        (Some([n[0] / len, n[1] / len, n[2] / len]), true)
                    } else {
                        (None, true)
                    }
                }
                _ => (None, false),
            };
            infos.push(FaceInfo {
                index,
                centroid: face_centroid(face),
                normal,
                planar,
            });
            index += 1;
        }
    }
    infos
}

/// Enumerate the unique edges of a solid with endpoint samples.
pub fn edge_infos(solid: &Solid) -> Vec<EdgeInfo> {
    let mut infos = Vec::new();
    let mut seen = HashSet::new();
    let mut index = 0;
    for shell in solid.inner.boundaries().iter() {
        for edge in shell.edge_iter() {
            if !seen.insert(edge.id()) {
                continue;
            }
            let front = edge.front().point();
            let back = edge.back().point();
            let start = [front[0], front[1], front[2]];
            let end = [back[0], back[1], back[2]];
            let d = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
            let length = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            let direction = if length > 1e-12 {
                Some([d[0] / length, d[1] / length, d[2] / length])
            } else {
                None
            };
            infos.push(EdgeInfo {
                index,
                start,
                end,
                midpoint: [
                    (start[0] + end[0]) / 2.0,
                    (start[1] + end[1]) / 2.0,
                    (start[2] + end[2]) / 2.0,
                ],
                direction,
                length,
            });
            index += 1;
        }
    }
    infos
}

fn nth_face(solid: &Solid, face_index: usize) -> Result<&Face, KernelError> {
    let mut index = 0;
    for shell in solid.inner.boundaries().iter() {
        for face in shell.face_iter() {
            if index == face_index {
                return Ok(face);
            }
            index += 1;
        }
    }
    Err(KernelError::InvalidInput {
        reason: format!("face index {face_index} out of range ({index} faces)"),
    })
}

/// Ordered vertex loop of a face's outer wire.
///
/// For a face with holes the outer wire is taken as the one spanning the
/// largest bounding box.
pub fn face_outer_loop(solid: &Solid, face_index: usize) -> Result<Vec<[f64; 3]>, KernelError> {
    let face = nth_face(solid, face_index)?;
    let mut best: Option<(f64, Vec<[f64; 3]>)> = None;
    for wire in face.boundaries() {
        let loop_pts: Vec<[f64; 3]> = wire
            .vertex_iter()
            .map(|v| {
                let p = v.point();
                [p[0], p[1], p[2]]
            })
            .collect();
        let diag = crate::types::Aabb::from_points(loop_pts.iter().copied())
            .map(|bb| {
                let s = bb.size();
                s[0] * s[0] + s[1] * s[1] + s[2] * s[2]
            })
            .unwrap_or(0.0);
        if best.as_ref().map_or(true, |(d, _)| diag > *d) {
            best = Some((diag, loop_pts));
        }
    }
    best.map(|(_, pts)| pts).ok_or(KernelError::EmptyResult {
        op: "face outer loop",
    })
}

/// Points sampled along every boundary curve of a face at the given
/// tolerance. Captures the true extent of curved boundaries, which the
/// vertex loop alone does not.
pub fn face_boundary_samples(
    solid: &Solid,
    face_index: usize,
    tolerance: f64,
) -> Result<Vec<[f64; 3]>, KernelError> {
    use truck_modeling::{BoundedCurve, ParameterDivision1D, ParametricCurve};

    // Uniform per-edge samples on top of the adaptive division: straight
    // edges divide into endpoints only, whose corner positions alone can
    // masquerade as a circle.
    const UNIFORM_PER_EDGE: usize = 8;

    let face = nth_face(solid, face_index)?;
    let mut samples = Vec::new();
    for wire in face.boundaries() {
        for edge in wire.edge_iter() {
            let curve = edge.oriented_curve();
            let range = curve.range_tuple();
            let (_params, points) = curve.parameter_division(range, tolerance);
            for p in points {
                samples.push([p[0], p[1], p[2]]);
            }
            let (t0, t1) = range;
            for i in 1..UNIFORM_PER_EDGE {
                let t = t0 + (t1 - t0) * (i as f64) / (UNIFORM_PER_EDGE as f64);
                let p = curve.subs(t);
                samples.push([p[0], p[1], p[2]]);
            }
        }
    }
    if samples.is_empty() {
        return Err(KernelError::EmptyResult {
            op: "face boundary sampling",
        });
    }
    Ok(samples)
}

/// Indices (in [`edge_infos`] enumeration order) of the edges bounding the
/// given face.
pub fn face_edge_indices(solid: &Solid, face_index: usize) -> Result<Vec<usize>, KernelError> {
    let mut edge_order = Vec::new();
    let mut seen = HashSet::new();
    for shell in solid.inner.boundaries().iter() {
        for edge in shell.edge_iter() {
            if seen.insert(edge.id()) {
                edge_order.push(edge.id());
            }
        }
    }

    let face = nth_face(solid, face_index)?;
    let mut indices = Vec::new();
    for wire in face.boundaries() {
        for edge in wire.edge_iter() {
            if let Some(i) = edge_order.iter().position(|id| *id == edge.id()) {
                if !indices.contains(&i) {
                    indices.push(i);
                }
            }
        }
    }
    Ok(indices)
}

/// Classify a sampled boundary as a circle, reporting centre and radius.
///
/// All samples must be equidistant from their mean within a 0.1 % spread.
pub fn classify_circle(samples: &[[f64; 3]]) -> Option<([f64; 3], f64)> {
    if samples.len() < 8 {
        return None;
    }
    let n = samples.len() as f64;
    let mut centre = [0.0; 3];
    for p in samples {
        centre[0] += p[0];
        centre[1] += p[1];
        centre[2] += p[2];
    }
    centre = [centre[0] / n, centre[1] / n, centre[2] / n];

    let mut min_r = f64::MAX;
    let mut max_r: f64 = 0.0;
    let mut sum_r = 0.0;
    for p in samples {
        let d = [p[0] - centre[0], p[1] - centre[1], p[2] - centre[2]];
        let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        min_r = min_r.min(r);
        max_r = max_r.max(r);
        sum_r += r;
    }
    let mean_r = sum_r / n;
    if mean_r < 1e-9 {
        return None;
    }
    if (max_r - min_r) / mean_r < 1e-3 {
        Some((centre, mean_r))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn cuboid_face_normals_are_axis_aligned() {
        let solid = primitives::cuboid(2.0, 2.0, 2.0).unwrap();
        let infos = face_infos(&solid);
        assert_eq!(infos.len(), 6);
        for info in &infos {
            assert!(info.planar);
            let n = info.normal.expect("box faces are planar");
            let max = n[0].abs().max(n[1].abs()).max(n[2].abs());
            assert!((max - 1.0).abs() < 1e-9, "normal not axis aligned: {n:?}");
        }
        // exactly one face looks up
        let up = infos
            .iter()
            .filter(|i| i.normal.map_or(false, |n| n[2] > 0.9))
            .count();
        assert_eq!(up, 1);
    }

    #[test]
    fn cuboid_top_face_centroid() {
        let solid = primitives::cuboid(4.0, 2.0, 6.0).unwrap();
        let infos = face_infos(&solid);
        let top = infos
            .iter()
            .find(|i| i.normal.map_or(false, |n| n[2] > 0.9))
            .unwrap();
        assert!((top.centroid[0]).abs() < 1e-9);
        assert!((top.centroid[1]).abs() < 1e-9);
        assert!((top.centroid[2] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn cuboid_edges() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        let infos = edge_infos(&solid);
        assert_eq!(infos.len(), 12);
        let vertical = infos
            .iter()
            .filter(|e| e.direction.map_or(false, |d| d[2].abs() > 0.9))
            .count();
        assert_eq!(vertical, 4);
        for e in &infos {
            assert!((e.length - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn outer_loop_of_box_face_has_four_vertices() {
        let solid = primitives::cuboid(2.0, 3.0, 1.0).unwrap();
        let infos = face_infos(&solid);
        let top = infos
            .iter()
            .find(|i| i.normal.map_or(false, |n| n[2] > 0.9))
            .unwrap();
        let outer = face_outer_loop(&solid, top.index).unwrap();
        assert_eq!(outer.len(), 4);
        for p in &outer {
            assert!((p[2] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn circular_face_classifies_as_circle() {
        let solid = primitives::cylinder(5.0, 2.0).unwrap();
        let infos = face_infos(&solid);
        let top = infos
            .iter()
            .find(|i| i.planar && i.normal.map_or(false, |n| n[2] > 0.9))
            .unwrap();
        let samples = face_boundary_samples(&solid, top.index, 0.01).unwrap();
        let (centre, radius) = classify_circle(&samples).expect("top of a cylinder is a circle");
        assert!((radius - 5.0).abs() < 0.01, "radius {radius}");
        assert!(centre[0].abs() < 0.01 && centre[1].abs() < 0.01);
        assert!((centre[2] - 2.0).abs() < 0.01);
    }

    #[test]
    fn square_face_is_not_a_circle() {
        let solid = primitives::cuboid(4.0, 4.0, 1.0).unwrap();
        let infos = face_infos(&solid);
        let top = infos
            .iter()
            .find(|i| i.normal.map_or(false, |n| n[2] > 0.9))
            .unwrap();
        let samples = face_boundary_samples(&solid, top.index, 0.01).unwrap();
        assert!(classify_circle(&samples).is_none());
    }

    #[test]
    fn face_index_out_of_range() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        assert!(face_outer_loop(&solid, 99).is_err());
    }
}
