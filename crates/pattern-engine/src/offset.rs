//! Inward polygon offset in a face's 2-D frame.
//!
//! Shared by the border engine (frame cutters) and the pattern engine
//! (partial/whole clip volumes).

use crate::types::CutError;

/// Two offset vertices closer than this collapse the offset (degeneracy
/// from an excessive inset on a tight corner).
const DEGENERATE_SPACING: f64 = 1e-6;

/// Edge directions with a cross product below this are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Signed area of a 2-D polygon by the shoelace formula.
pub fn signed_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i][0] * points[j][1];
        area -= points[j][0] * points[i][1];
    }
    area / 2.0
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn cross(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

fn norm(a: [f64; 2]) -> f64 {
    (a[0] * a[0] + a[1] * a[1]).sqrt()
}

/// Offset a closed polygon inward by `inset`.
///
/// Every edge is shifted along its inward normal; each output vertex is the
/// intersection of its two adjacent shifted edges, or the midpoint of the
/// two shifted endpoints when the edges are parallel. Collapsed results are
/// reported as degenerate rather than returned.
pub fn offset_polygon(points: &[[f64; 2]], inset: f64) -> Result<Vec<[f64; 2]>, CutError> {
    let n = points.len();
    if n < 3 {
        return Err(CutError::OffsetDegenerate {
            reason: format!("polygon has {n} vertices, need at least 3"),
        });
    }

    // Orientation decides which perpendicular is "inward".
    let area = signed_area(points);
    if area.abs() < DEGENERATE_SPACING * DEGENERATE_SPACING {
        return Err(CutError::OffsetDegenerate {
            reason: "polygon has near-zero area".to_string(),
        });
    }
    let inward_sign = if area > 0.0 { 1.0 } else { -1.0 };

    // Per-edge unit direction and inward normal.
    let mut dirs = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let d = sub(points[j], points[i]);
        let len = norm(d);
        if len < DEGENERATE_SPACING {
            return Err(CutError::OffsetDegenerate {
                reason: format!("edge {i} has near-zero length"),
            });
        }
        let d = [d[0] / len, d[1] / len];
        dirs.push(d);
        // left perpendicular, flipped for clockwise loops
        normals.push([-d[1] * inward_sign, d[0] * inward_sign]);
    }

    let mut offset = Vec::with_capacity(n);
    for i in 0..n {
        let prev = (i + n - 1) % n;
        // the two edges meeting at vertex i, each shifted inward
        let p_prev = [
            points[i][0] + normals[prev][0] * inset,
            points[i][1] + normals[prev][1] * inset,
        ];
        let p_next = [
            points[i][0] + normals[i][0] * inset,
            points[i][1] + normals[i][1] * inset,
        ];
        let denom = cross(dirs[prev], dirs[i]);
        let vertex = if denom.abs() < PARALLEL_EPSILON {
            [
                (p_prev[0] + p_next[0]) / 2.0,
                (p_prev[1] + p_next[1]) / 2.0,
            ]
        } else {
            // intersection of p_prev + t*dirs[prev] with p_next + s*dirs[i]
            let t = cross(sub(p_next, p_prev), dirs[i]) / denom;
            [
                p_prev[0] + dirs[prev][0] * t,
                p_prev[1] + dirs[prev][1] * t,
            ]
        };
        offset.push(vertex);
    }

    for i in 0..n {
        let j = (i + 1) % n;
        if norm(sub(offset[j], offset[i])) < DEGENERATE_SPACING {
            return Err(CutError::OffsetDegenerate {
                reason: format!("offset vertices {i} and {j} collapsed"),
            });
        }
    }

    // An inset past the medial axis flips the loop inside out.
    if signed_area(&offset) * area <= 0.0 {
        return Err(CutError::OffsetDegenerate {
            reason: "offset inverted the boundary".to_string(),
        });
    }

    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f64) -> Vec<[f64; 2]> {
        vec![
            [-half, -half],
            [half, -half],
            [half, half],
            [-half, half],
        ]
    }

    fn assert_close(a: [f64; 2], b: [f64; 2]) {
        assert!(
            (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn square_insets_uniformly() {
        let inset = offset_polygon(&square(5.0), 2.0).unwrap();
        assert_eq!(inset.len(), 4);
        for v in &inset {
            assert!((v[0].abs() - 3.0).abs() < 1e-9);
            assert!((v[1].abs() - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn clockwise_square_insets_the_same_way() {
        let mut cw = square(5.0);
        cw.reverse();
        let inset = offset_polygon(&cw, 2.0).unwrap();
        for v in &inset {
            assert!((v[0].abs() - 3.0).abs() < 1e-9);
            assert!((v[1].abs() - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn hexagon_insets_by_constant_radial_width() {
        let apothem = 10.0;
        let r = apothem / (std::f64::consts::PI / 6.0).cos();
        let hex: Vec<[f64; 2]> = (0..6)
            .map(|k| {
                let theta = std::f64::consts::PI / 6.0 + k as f64 * std::f64::consts::PI / 3.0;
                [r * theta.cos(), r * theta.sin()]
            })
            .collect();
        let inset = offset_polygon(&hex, 2.0).unwrap();
        // inset hexagon has apothem reduced by exactly the offset
        let expected_r = (apothem - 2.0) / (std::f64::consts::PI / 6.0).cos();
        for v in &inset {
            let got = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!((got - expected_r).abs() < 1e-9, "radius {got}");
        }
    }

    #[test]
    fn offset_round_trip_restores_a_convex_polygon() {
        let poly = vec![[0.0, 0.0], [8.0, 1.0], [9.0, 6.0], [3.0, 9.0], [-1.0, 4.0]];
        let inset = offset_polygon(&poly, 1.5).unwrap();
        let back = offset_polygon(&inset, -1.5).unwrap();
        for (a, b) in poly.iter().zip(back.iter()) {
            assert_close(*a, *b);
        }
    }

    #[test]
    fn excessive_inset_collapses() {
        let result = offset_polygon(&square(2.0), 2.5);
        assert!(matches!(result, Err(CutError::OffsetDegenerate { .. })));
    }

    #[test]
    fn too_few_vertices() {
        let result = offset_polygon(&[[0.0, 0.0], [1.0, 0.0]], 0.1);
        assert!(matches!(result, Err(CutError::OffsetDegenerate { .. })));
    }

    #[test]
    fn negative_area_loop_is_not_degenerate() {
        // a thin sliver is fine as long as the offset fits
        let sliver = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 1.0], [0.0, 1.0]];
        let inset = offset_polygon(&sliver, 0.25).unwrap();
        assert_eq!(inset.len(), 4);
        assert!((inset[0][1] - 0.25).abs() < 1e-9);
    }
}
