use std::collections::HashSet;
use std::fmt;

use truck_modeling::topology::Solid as TruckSolid;

/// A BREP solid owned by the kernel.
///
/// Cloning is cheap relative to kernel operations; the wrapped topology is
/// reference-counted internally. The inner representation is never exposed
/// outside the façade.
#[derive(Clone)]
pub struct Solid {
    pub(crate) inner: TruckSolid,
}

impl Solid {
    pub(crate) fn new(inner: TruckSolid) -> Self {
        Self { inner }
    }

    /// Number of closed shells bounding this solid.
    pub fn shell_count(&self) -> usize {
        self.inner.boundaries().len()
    }

    /// Total face count over all shells.
    pub fn face_count(&self) -> usize {
        self.inner
            .boundaries()
            .iter()
            .map(|shell| shell.face_iter().count())
            .sum()
    }

    /// Total edge count over all shells, deduplicated.
    pub fn edge_count(&self) -> usize {
        let mut seen = HashSet::new();
        for shell in self.inner.boundaries().iter() {
            for edge in shell.edge_iter() {
                seen.insert(edge.id());
            }
        }
        seen.len()
    }

    /// Total vertex count over all shells, deduplicated.
    pub fn vertex_count(&self) -> usize {
        let mut seen = HashSet::new();
        for shell in self.inner.boundaries().iter() {
            for v in shell.vertex_iter() {
                seen.insert(v.id());
            }
        }
        seen.len()
    }
}

impl fmt::Debug for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solid")
            .field("shells", &self.shell_count())
            .field("faces", &self.face_count())
            .finish()
    }
}
