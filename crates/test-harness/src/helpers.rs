//! Mesh-level assertions for scenario tests.

use kernel_bridge::TriMesh;

/// Relative difference of two quantities, guarded against zero.
pub fn relative_error(got: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-12 {
        got.abs()
    } else {
        (got - expected).abs() / expected.abs()
    }
}

/// Assert two floats agree within an absolute tolerance.
pub fn assert_near(got: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (got - expected).abs() <= tolerance,
        "{what}: got {got}, expected {expected} (± {tolerance})"
    );
}

/// Total area of the mesh triangles lying in the horizontal plane
/// z = `height` (all three vertices within `eps`).
///
/// Measures the visible footprint of a face after cutting, e.g. the
/// remaining frame area on the top of a plate.
pub fn planar_area_at(mesh: &TriMesh, height: f64, eps: f64) -> f64 {
    let verts = &mesh.vertices;
    let mut area = 0.0;
    for tri in mesh.indices.chunks(3) {
        let (i0, i1, i2) = (
            tri[0] as usize * 3,
            tri[1] as usize * 3,
            tri[2] as usize * 3,
        );
        let z0 = verts[i0 + 2] as f64;
        let z1 = verts[i1 + 2] as f64;
        let z2 = verts[i2 + 2] as f64;
        if (z0 - height).abs() > eps || (z1 - height).abs() > eps || (z2 - height).abs() > eps {
            continue;
        }
        let ax = verts[i1] as f64 - verts[i0] as f64;
        let ay = verts[i1 + 1] as f64 - verts[i0 + 1] as f64;
        let bx = verts[i2] as f64 - verts[i0] as f64;
        let by = verts[i2 + 1] as f64 - verts[i0 + 1] as f64;
        area += (ax * by - ay * bx).abs() / 2.0;
    }
    area
}
