//! Rigid transforms over whole solids.

use truck_modeling::builder;
use truck_modeling::{InnerSpace, Point3, Rad, Vector3};

use crate::solid::Solid;
use crate::types::KernelError;

/// Translate a solid by a world-space offset.
pub fn translated(solid: &Solid, offset: [f64; 3]) -> Solid {
    Solid::new(builder::translated(
        &solid.inner,
        Vector3::new(offset[0], offset[1], offset[2]),
    ))
}

/// Rotate a solid about an axis through `origin`, angle in degrees.
pub fn rotated(
    solid: &Solid,
    origin: [f64; 3],
    axis: [f64; 3],
    degrees: f64,
) -> Result<Solid, KernelError> {
    let axis = Vector3::new(axis[0], axis[1], axis[2]);
    if axis.magnitude() < 1e-12 {
        return Err(KernelError::InvalidInput {
            reason: "rotation axis has zero length".to_string(),
        });
    }
    Ok(Solid::new(builder::rotated(
        &solid.inner,
        Point3::new(origin[0], origin[1], origin[2]),
        axis.normalize(),
        Rad(degrees.to_radians()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mesh, primitives};

    #[test]
    fn translation_moves_bbox() {
        let solid = primitives::cuboid(2.0, 2.0, 2.0).unwrap();
        let moved = translated(&solid, [10.0, 0.0, -1.0]);
        let bb = mesh::bounding_box(&moved).unwrap();
        assert!((bb.min[0] - 9.0).abs() < 1e-6);
        assert!((bb.max[0] - 11.0).abs() < 1e-6);
        assert!((bb.min[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_preserves_volume() {
        let solid = primitives::cuboid(1.0, 2.0, 3.0).unwrap();
        let turned = rotated(&solid, [0.0; 3], [0.0, 0.0, 1.0], 30.0).unwrap();
        let v0 = mesh::volume(&solid).unwrap();
        let v1 = mesh::volume(&turned).unwrap();
        assert!((v0 - v1).abs() < 0.05, "volume changed: {v0} vs {v1}");
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let solid = primitives::cuboid(4.0, 2.0, 1.0).unwrap();
        let turned = rotated(&solid, [0.0; 3], [0.0, 0.0, 1.0], 90.0).unwrap();
        let bb = mesh::bounding_box(&turned).unwrap();
        let size = bb.size();
        assert!((size[0] - 2.0).abs() < 1e-6, "x extent: {}", size[0]);
        assert!((size[1] - 4.0).abs() < 1e-6, "y extent: {}", size[1]);
    }

    #[test]
    fn zero_axis_is_rejected() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        assert!(rotated(&solid, [0.0; 3], [0.0; 3], 45.0).is_err());
    }
}
