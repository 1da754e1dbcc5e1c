//! Cutter placement: template-local Z rotation, the rotation mapping the
//! template's +Z onto the face normal, and the final translation onto the
//! face. Rotation composes first, translation second.

use kernel_bridge::{transforms, Solid};

use crate::frame::{DominantAxis, FaceFrame};
use crate::types::CutError;

const ORIGIN: [f64; 3] = [0.0; 3];
const X: [f64; 3] = [1.0, 0.0, 0.0];
const Y: [f64; 3] = [0.0, 1.0, 0.0];
const Z: [f64; 3] = [0.0, 0.0, 1.0];

/// Rotate a template so its +Z axis points along the face's outward
/// normal. ±Z faces need no turn beyond the 180° flip for −Z.
pub fn orient_to_face(solid: &Solid, dominant: DominantAxis) -> Result<Solid, CutError> {
    let turned = match dominant {
        DominantAxis::PlusZ => solid.clone(),
        DominantAxis::MinusZ => transforms::rotated(solid, ORIGIN, X, 180.0)?,
        DominantAxis::PlusX => transforms::rotated(solid, ORIGIN, Y, 90.0)?,
        DominantAxis::MinusX => transforms::rotated(solid, ORIGIN, Y, -90.0)?,
        DominantAxis::PlusY => transforms::rotated(solid, ORIGIN, X, -90.0)?,
        DominantAxis::MinusY => transforms::rotated(solid, ORIGIN, X, 90.0)?,
    };
    Ok(turned)
}

/// Place one template cutter at a face-local (u,v) position.
///
/// `local_rotation` spins the template about its own Z axis before the
/// face orientation is applied; `quarter_turn` adds the extra 90° that
/// keeps line lengths along the first tangent axis on ±X-dominant faces.
pub fn place_cutter(
    template: &Solid,
    frame: &FaceFrame,
    uv: [f64; 2],
    depth: f64,
    local_rotation: f64,
    quarter_turn: bool,
) -> Result<Solid, CutError> {
    let mut spin = local_rotation;
    if quarter_turn {
        spin += 90.0;
    }
    let turned = if spin != 0.0 {
        transforms::rotated(template, ORIGIN, Z, spin)?
    } else {
        template.clone()
    };
    let oriented = orient_to_face(&turned, frame.dominant)?;

    let p = frame.point_at(uv[0], uv[1]);
    let offset = [
        p[0] - depth * frame.normal[0],
        p[1] - depth * frame.normal[1],
        p[2] - depth * frame.normal[2],
    ];
    Ok(transforms::translated(&oriented, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_bridge::{mesh, primitives};

    fn frame(dominant: DominantAxis, normal: [f64; 3], centre: [f64; 3]) -> FaceFrame {
        FaceFrame {
            normal,
            centre,
            u_size: 20.0,
            v_size: 20.0,
            dominant,
        }
    }

    /// A 4 x 2 x 3 template for checking where each local axis ends up.
    fn template() -> Solid {
        primitives::cuboid(4.0, 2.0, 3.0).unwrap()
    }

    #[test]
    fn plus_z_face_keeps_template_axes() {
        let f = frame(DominantAxis::PlusZ, [0.0, 0.0, 1.0], [0.0, 0.0, 10.0]);
        let placed = place_cutter(&template(), &f, [3.0, -2.0], 2.0, 0.0, false).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        // x stays length, z spans (centre - depth) .. (centre - depth + 3)
        assert!((bb.size()[0] - 4.0).abs() < 1e-6);
        assert!((bb.size()[1] - 2.0).abs() < 1e-6);
        assert!((bb.min[2] - 8.0).abs() < 1e-6);
        assert!((bb.max[2] - 11.0).abs() < 1e-6);
        assert!((bb.center()[0] - 3.0).abs() < 1e-6);
        assert!((bb.center()[1] + 2.0).abs() < 1e-6);
    }

    #[test]
    fn minus_z_face_cuts_upward() {
        let f = frame(DominantAxis::MinusZ, [0.0, 0.0, -1.0], [0.0, 0.0, 0.0]);
        let placed = place_cutter(&template(), &f, [0.0, 0.0], 2.0, 0.0, false).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        // template +Z now points down; cutter reaches 1 below the face and
        // depth above it
        assert!((bb.min[2] + 1.0).abs() < 1e-6);
        assert!((bb.max[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn plus_x_face_points_the_template_along_x() {
        let f = frame(DominantAxis::PlusX, [1.0, 0.0, 0.0], [10.0, 0.0, 0.0]);
        let placed = place_cutter(&template(), &f, [0.0, 0.0], 2.0, 0.0, false).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        // template z (3 long) now runs along world x, ending 1 past the face
        assert!((bb.min[0] - 8.0).abs() < 1e-6);
        assert!((bb.max[0] - 11.0).abs() < 1e-6);
        // template x (4 long, the length) lands on -Z without a quarter turn
        assert!((bb.size()[2] - 4.0).abs() < 1e-6);
        assert!((bb.size()[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_swings_length_onto_u() {
        let f = frame(DominantAxis::PlusX, [1.0, 0.0, 0.0], [10.0, 0.0, 0.0]);
        let placed = place_cutter(&template(), &f, [0.0, 0.0], 2.0, 0.0, true).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        // with the quarter turn the template length runs along u = world Y
        assert!((bb.size()[1] - 4.0).abs() < 1e-6);
        assert!((bb.size()[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn plus_y_face_keeps_length_on_u() {
        let f = frame(DominantAxis::PlusY, [0.0, 1.0, 0.0], [0.0, 10.0, 0.0]);
        let placed = place_cutter(&template(), &f, [0.0, 0.0], 2.0, 0.0, false).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        // u axis of a ±Y face is world X, and the template length stays there
        assert!((bb.size()[0] - 4.0).abs() < 1e-6);
        assert!((bb.min[1] - 8.0).abs() < 1e-6);
        assert!((bb.max[1] - 11.0).abs() < 1e-6);
    }

    #[test]
    fn local_rotation_spins_the_footprint() {
        let f = frame(DominantAxis::PlusZ, [0.0, 0.0, 1.0], [0.0, 0.0, 5.0]);
        let placed = place_cutter(&template(), &f, [0.0, 0.0], 1.0, 90.0, false).unwrap();
        let bb = mesh::bounding_box(&placed).unwrap();
        assert!((bb.size()[0] - 2.0).abs() < 1e-6);
        assert!((bb.size()[1] - 4.0).abs() < 1e-6);
    }
}
