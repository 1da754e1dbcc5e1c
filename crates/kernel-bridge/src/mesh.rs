//! Tessellation and the mesh-derived queries built on it: volume via the
//! divergence theorem and axis-aligned bounding boxes.

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

use crate::solid::Solid;
use crate::types::{Aabb, KernelError, TriMesh};

/// Default tessellation tolerance for internal volume/bbox queries.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Tessellate a solid into a triangle mesh.
pub fn tessellate(solid: &Solid, tolerance: f64) -> Result<TriMesh, KernelError> {
    let meshed = solid.inner.triangulation(tolerance);
    let mesh = meshed.to_polygon();

    let positions = mesh.positions();
    let normals = mesh.normals();
    let tri_faces = mesh.tri_faces();

    let mut vertices = Vec::with_capacity(positions.len() * 3);
    let mut norms = Vec::with_capacity(normals.len() * 3);
    let mut indices = Vec::new();

    for pos in positions {
        vertices.push(pos[0] as f32);
        vertices.push(pos[1] as f32);
        vertices.push(pos[2] as f32);
    }
    for norm in normals {
        norms.push(norm[0] as f32);
        norms.push(norm[1] as f32);
        norms.push(norm[2] as f32);
    }
    for tri in tri_faces {
        for v in tri.iter() {
            indices.push(v.pos as u32);
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        return Err(KernelError::EmptyResult { op: "tessellation" });
    }

    Ok(TriMesh {
        vertices,
        normals: norms,
        indices,
    })
}

/// Signed volume of a closed triangle mesh by the divergence theorem.
pub fn mesh_volume(mesh: &TriMesh) -> f64 {
    let verts = &mesh.vertices;
    let mut volume = 0.0f64;
    for tri in mesh.indices.chunks(3) {
        let (i0, i1, i2) = (
            tri[0] as usize * 3,
            tri[1] as usize * 3,
            tri[2] as usize * 3,
        );
        let (x0, y0, z0) = (verts[i0] as f64, verts[i0 + 1] as f64, verts[i0 + 2] as f64);
        let (x1, y1, z1) = (verts[i1] as f64, verts[i1 + 1] as f64, verts[i1 + 2] as f64);
        let (x2, y2, z2) = (verts[i2] as f64, verts[i2 + 1] as f64, verts[i2 + 2] as f64);
        // Signed volume of the tetrahedron formed by the triangle and the origin
        volume += x0 * (y1 * z2 - y2 * z1) + x1 * (y2 * z0 - y0 * z2) + x2 * (y0 * z1 - y1 * z0);
    }
    (volume / 6.0).abs()
}

/// Bounding box of a triangle mesh. `None` for an empty mesh.
pub fn mesh_bounding_box(mesh: &TriMesh) -> Option<Aabb> {
    Aabb::from_points(
        mesh.vertices
            .chunks(3)
            .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64]),
    )
}

/// Enclosed volume of a solid at the given tessellation tolerance.
pub fn volume_with_tolerance(solid: &Solid, tolerance: f64) -> Result<f64, KernelError> {
    Ok(mesh_volume(&tessellate(solid, tolerance)?))
}

/// Enclosed volume of a solid at the default tolerance.
pub fn volume(solid: &Solid) -> Result<f64, KernelError> {
    volume_with_tolerance(solid, DEFAULT_TOLERANCE)
}

/// World-space bounding box of a solid.
pub fn bounding_box(solid: &Solid) -> Result<Aabb, KernelError> {
    mesh_bounding_box(&tessellate(solid, DEFAULT_TOLERANCE)?)
        .ok_or(KernelError::EmptyResult { op: "bounding box" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn tessellated_cuboid_has_triangles() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        let mesh = tessellate(&solid, 0.1).unwrap();
        assert!(mesh.triangle_count() >= 12);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
    }

    #[test]
    fn unit_cube_volume_and_bbox() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        let vol = volume(&solid).unwrap();
        assert!((vol - 1.0).abs() < 0.01, "expected ~1, got {vol}");

        let bb = bounding_box(&solid).unwrap();
        assert!((bb.size()[0] - 1.0).abs() < 1e-6);
        assert!((bb.size()[2] - 1.0).abs() < 1e-6);
        assert_eq!(bb.center()[0], 0.0);
    }

    #[test]
    fn volume_is_deterministic() {
        let solid = primitives::cylinder(3.0, 5.0).unwrap();
        let v1 = volume(&solid).unwrap();
        let v2 = volume(&solid).unwrap();
        assert_eq!(v1, v2);
    }
}
