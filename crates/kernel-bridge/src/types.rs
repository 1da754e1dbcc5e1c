use serde::{Deserialize, Serialize};

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("{op} builder failed: {reason}")]
    BuilderFailed { op: &'static str, reason: String },

    #[error("boolean {op} failed: {reason}")]
    BooleanFailed { op: &'static str, reason: String },

    #[error("{op} produced an empty result")]
    EmptyResult { op: &'static str },

    #[error("operation not supported by the kernel: {operation}")]
    NotSupported { operation: &'static str },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Tessellated triangle mesh handed to downstream meshers and used
/// internally for volume and bounding-box queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals, parallel to `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    /// Tightest box around a set of points. `None` for an empty set.
    pub fn from_points<I: IntoIterator<Item = [f64; 3]>>(points: I) -> Option<Aabb> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Aabb {
            min: first,
            max: first,
        };
        for p in iter {
            for i in 0..3 {
                bb.min[i] = bb.min[i].min(p[i]);
                bb.max[i] = bb.max[i].max(p[i]);
            }
        }
        Some(bb)
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Largest extent over the three axes.
    pub fn max_extent(&self) -> f64 {
        let s = self.size();
        s[0].max(s[1]).max(s[2])
    }

    /// Whether the boxes overlap, with boundary contact counting as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points() {
        let bb = Aabb::from_points([[0.0, 1.0, 2.0], [-1.0, 5.0, 0.0]]).unwrap();
        assert_eq!(bb.min, [-1.0, 1.0, 0.0]);
        assert_eq!(bb.max, [0.0, 5.0, 2.0]);
        assert_eq!(bb.size(), [1.0, 4.0, 2.0]);
        assert_eq!(bb.center(), [-0.5, 3.0, 1.0]);
        assert_eq!(bb.max_extent(), 4.0);
    }

    #[test]
    fn aabb_overlap() {
        let a = Aabb {
            min: [0.0; 3],
            max: [1.0; 3],
        };
        let b = Aabb {
            min: [0.5, 0.5, 0.5],
            max: [2.0; 3],
        };
        let c = Aabb {
            min: [3.0; 3],
            max: [4.0; 3],
        };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn aabb_touching_counts_as_overlap() {
        let a = Aabb {
            min: [0.0; 3],
            max: [1.0; 3],
        };
        let b = Aabb {
            min: [1.0, 0.0, 0.0],
            max: [2.0, 1.0, 1.0],
        };
        assert!(a.overlaps(&b));
    }
}
