//! Face frame analysis: the per-face local coordinate system patterns are
//! laid out in.
//!
//! Only axis-aligned planar faces are fully supported; other planar faces
//! come out right iff their tangents coincide with a world axis pair, and
//! curved faces are rejected as unanalysable.

use kernel_bridge::{introspect, mesh, Aabb, Solid};

use crate::types::CutError;

/// Sampling tolerance for face boundary extents.
pub(crate) const BOUNDARY_TOLERANCE: f64 = 0.01;

/// The world axis closest to a face's outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantAxis {
    PlusX,
    MinusX,
    PlusY,
    MinusY,
    PlusZ,
    MinusZ,
}

impl DominantAxis {
    /// Largest-component axis of a normal, ties broken z > x > y.
    pub fn from_normal(n: [f64; 3]) -> DominantAxis {
        let ax = n[0].abs();
        let ay = n[1].abs();
        let az = n[2].abs();
        if az >= ax && az >= ay {
            if n[2] >= 0.0 {
                DominantAxis::PlusZ
            } else {
                DominantAxis::MinusZ
            }
        } else if ax >= ay {
            if n[0] >= 0.0 {
                DominantAxis::PlusX
            } else {
                DominantAxis::MinusX
            }
        } else if n[1] >= 0.0 {
            DominantAxis::PlusY
        } else {
            DominantAxis::MinusY
        }
    }

    /// Index (0/1/2) of the world axis.
    pub fn axis_index(&self) -> usize {
        match self {
            DominantAxis::PlusX | DominantAxis::MinusX => 0,
            DominantAxis::PlusY | DominantAxis::MinusY => 1,
            DominantAxis::PlusZ | DominantAxis::MinusZ => 2,
        }
    }

    pub fn is_x(&self) -> bool {
        self.axis_index() == 0
    }
}

/// A face's layout frame: outward normal, centred origin, two world-axis
/// tangents, and the (u,v) extent of the face's bounding box.
///
/// Derived per call, never stored across calls.
#[derive(Debug, Clone)]
pub struct FaceFrame {
    pub normal: [f64; 3],
    pub centre: [f64; 3],
    pub u_size: f64,
    pub v_size: f64,
    pub dominant: DominantAxis,
}

impl FaceFrame {
    /// Frame of face `face_index` of `solid`.
    pub fn for_face(solid: &Solid, face_index: usize) -> Result<FaceFrame, CutError> {
        let infos = introspect::face_infos(solid);
        let info = infos
            .get(face_index)
            .ok_or_else(|| CutError::InvalidInput {
                reason: format!("face index {face_index} out of range"),
            })?;
        let normal = info.normal.ok_or_else(|| CutError::FaceUnanalyzable {
            reason: "face has no finite plane normal".to_string(),
        })?;

        let samples = introspect::face_boundary_samples(solid, face_index, BOUNDARY_TOLERANCE)?;
        let bbox = Aabb::from_points(samples).ok_or_else(|| CutError::FaceUnanalyzable {
            reason: "face boundary produced no samples".to_string(),
        })?;

        Ok(Self::from_bbox(normal, &bbox))
    }

    /// Synthetic frame over the world-+Z face of the solid's bounding box,
    /// used when no face is selected.
    pub fn synthetic_top(solid: &Solid) -> Result<FaceFrame, CutError> {
        let bbox = mesh::bounding_box(solid)?;
        let centre = bbox.center();
        let size = bbox.size();
        Ok(FaceFrame {
            normal: [0.0, 0.0, 1.0],
            centre: [centre[0], centre[1], bbox.max[2]],
            u_size: size[0],
            v_size: size[1],
            dominant: DominantAxis::PlusZ,
        })
    }

    fn from_bbox(normal: [f64; 3], bbox: &Aabb) -> FaceFrame {
        let dominant = DominantAxis::from_normal(normal);
        let size = bbox.size();
        let (u_size, v_size) = match dominant.axis_index() {
            2 => (size[0], size[1]),
            0 => (size[1], size[2]),
            _ => (size[0], size[2]),
        };
        FaceFrame {
            normal,
            centre: bbox.center(),
            u_size,
            v_size,
            dominant,
        }
    }

    /// First tangent axis: X for ±Z and ±Y faces, Y for ±X faces.
    pub fn u_axis(&self) -> [f64; 3] {
        match self.dominant.axis_index() {
            0 => [0.0, 1.0, 0.0],
            _ => [1.0, 0.0, 0.0],
        }
    }

    /// Second tangent axis: Y for ±Z faces, Z otherwise.
    pub fn v_axis(&self) -> [f64; 3] {
        match self.dominant.axis_index() {
            2 => [0.0, 1.0, 0.0],
            _ => [0.0, 0.0, 1.0],
        }
    }

    /// World position of a face-local (u,v) point.
    pub fn point_at(&self, u: f64, v: f64) -> [f64; 3] {
        let ua = self.u_axis();
        let va = self.v_axis();
        [
            self.centre[0] + u * ua[0] + v * va[0],
            self.centre[1] + u * ua[1] + v * va[1],
            self.centre[2] + u * ua[2] + v * va[2],
        ]
    }

    /// Face-local (u,v) of a world point.
    pub fn project(&self, p: [f64; 3]) -> [f64; 2] {
        let ua = self.u_axis();
        let va = self.v_axis();
        let d = [
            p[0] - self.centre[0],
            p[1] - self.centre[1],
            p[2] - self.centre[2],
        ];
        [
            d[0] * ua[0] + d[1] * ua[1] + d[2] * ua[2],
            d[0] * va[0] + d[1] * va[1] + d[2] * va[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_bridge::primitives;

    fn face_with_normal(solid: &Solid, want: [f64; 3]) -> usize {
        introspect::face_infos(solid)
            .iter()
            .find(|i| {
                i.normal.map_or(false, |n| {
                    (n[0] - want[0]).abs() < 1e-6
                        && (n[1] - want[1]).abs() < 1e-6
                        && (n[2] - want[2]).abs() < 1e-6
                })
            })
            .map(|i| i.index)
            .expect("no face with requested normal")
    }

    #[test]
    fn dominant_axis_ties_prefer_z_then_x() {
        assert_eq!(
            DominantAxis::from_normal([0.0, 0.0, 1.0]),
            DominantAxis::PlusZ
        );
        let d = 1.0 / 3.0f64.sqrt();
        assert_eq!(DominantAxis::from_normal([d, d, d]), DominantAxis::PlusZ);
        let e = 1.0 / 2.0f64.sqrt();
        assert_eq!(
            DominantAxis::from_normal([e, e, 0.0]),
            DominantAxis::PlusX
        );
        assert_eq!(
            DominantAxis::from_normal([0.0, -1.0, 0.0]),
            DominantAxis::MinusY
        );
    }

    #[test]
    fn top_face_frame_of_a_box() {
        let solid = primitives::cuboid(60.0, 40.0, 15.0).unwrap();
        let top = face_with_normal(&solid, [0.0, 0.0, 1.0]);
        let frame = FaceFrame::for_face(&solid, top).unwrap();

        assert_eq!(frame.dominant, DominantAxis::PlusZ);
        assert!((frame.u_size - 60.0).abs() < 1e-6);
        assert!((frame.v_size - 40.0).abs() < 1e-6);
        assert!((frame.centre[2] - 15.0).abs() < 1e-6);
        assert_eq!(frame.u_axis(), [1.0, 0.0, 0.0]);
        assert_eq!(frame.v_axis(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn side_face_frame_swaps_axes() {
        let solid = primitives::cuboid(60.0, 40.0, 15.0).unwrap();
        let side = face_with_normal(&solid, [1.0, 0.0, 0.0]);
        let frame = FaceFrame::for_face(&solid, side).unwrap();

        assert_eq!(frame.dominant, DominantAxis::PlusX);
        // ±X faces use (u,v) = (Y,Z)
        assert!((frame.u_size - 40.0).abs() < 1e-6);
        assert!((frame.v_size - 15.0).abs() < 1e-6);
        assert_eq!(frame.u_axis(), [0.0, 1.0, 0.0]);
        assert_eq!(frame.v_axis(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn circular_face_frame_spans_the_diameter() {
        let solid = primitives::cylinder(20.0, 10.0).unwrap();
        let infos = introspect::face_infos(&solid);
        let top = infos
            .iter()
            .find(|i| i.planar && i.normal.map_or(false, |n| n[2] > 0.9))
            .unwrap();
        let frame = FaceFrame::for_face(&solid, top.index).unwrap();
        assert!((frame.u_size - 40.0).abs() < 0.05, "u {}", frame.u_size);
        assert!((frame.v_size - 40.0).abs() < 0.05, "v {}", frame.v_size);
        assert!((frame.centre[2] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn curved_face_is_unanalysable() {
        let solid = primitives::cylinder(5.0, 5.0).unwrap();
        let curved = introspect::face_infos(&solid)
            .into_iter()
            .find(|i| !i.planar)
            .expect("cylinder has a curved wall");
        assert!(matches!(
            FaceFrame::for_face(&solid, curved.index),
            Err(CutError::FaceUnanalyzable { .. })
        ));
    }

    #[test]
    fn synthetic_frame_sits_on_the_bbox_top() {
        let solid = primitives::cuboid(10.0, 20.0, 5.0).unwrap();
        let frame = FaceFrame::synthetic_top(&solid).unwrap();
        assert_eq!(frame.dominant, DominantAxis::PlusZ);
        assert!((frame.u_size - 10.0).abs() < 1e-6);
        assert!((frame.v_size - 20.0).abs() < 1e-6);
        assert!((frame.centre[2] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn point_at_and_project_round_trip() {
        let solid = primitives::cuboid(10.0, 10.0, 10.0).unwrap();
        let side = face_with_normal(&solid, [0.0, -1.0, 0.0]);
        let frame = FaceFrame::for_face(&solid, side).unwrap();
        let p = frame.point_at(2.5, -1.5);
        let uv = frame.project(p);
        assert!((uv[0] - 2.5).abs() < 1e-9);
        assert!((uv[1] + 1.5).abs() < 1e-9);
    }
}
