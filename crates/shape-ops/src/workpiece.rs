use std::collections::BTreeMap;

use kernel_bridge::{booleans, fillets, introspect, mesh, primitives, transforms};
use kernel_bridge::{Aabb, Solid, TriMesh};
use knurl_types::{Axis, RefPlane};
use serde_json::Value;

use crate::error::OpError;
use crate::selector::Selector;

/// The three selection modes a solid value can carry.
///
/// Face/edge indices refer to the façade's stable enumeration order and are
/// only meaningful for the solid they were selected on; any operation that
/// rebuilds the solid clears the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Faces(Vec<usize>),
    Edges(Vec<usize>),
}

/// An immutable solid value.
///
/// Operations return a new `Workpiece`; the kernel may share geometry
/// internally, but the external view is value-semantic.
#[derive(Debug, Clone)]
pub struct Workpiece {
    solid: Solid,
    plane: RefPlane,
    selection: Selection,
    metadata: BTreeMap<String, Value>,
}

impl Workpiece {
    fn from_solid(solid: Solid) -> Self {
        Self {
            solid,
            plane: RefPlane::default(),
            selection: Selection::None,
            metadata: BTreeMap::new(),
        }
    }

    /// Box centred on (0,0) in XY, z from 0 to `height`.
    pub fn cuboid(length: f64, width: f64, height: f64) -> Result<Self, OpError> {
        Ok(Self::from_solid(primitives::cuboid(length, width, height)?))
    }

    /// Cylinder on axis +Z from z = 0.
    pub fn cylinder(radius: f64, height: f64) -> Result<Self, OpError> {
        Ok(Self::from_solid(primitives::cylinder(radius, height)?))
    }

    /// Regular n-sided prism, one flat side horizontal.
    pub fn regular_prism(n_sides: u32, flat_to_flat: f64, height: f64) -> Result<Self, OpError> {
        Ok(Self::from_solid(primitives::regular_prism(
            n_sides,
            flat_to_flat,
            height,
        )?))
    }

    /// The same value around a rebuilt solid: selection cleared, reference
    /// plane and metadata carried over.
    pub fn with_solid(&self, solid: Solid) -> Self {
        Self {
            solid,
            plane: self.plane,
            selection: Selection::None,
            metadata: self.metadata.clone(),
        }
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// First selected face index, if the selection holds faces.
    pub fn selected_face(&self) -> Option<usize> {
        match &self.selection {
            Selection::Faces(indices) => indices.first().copied(),
            _ => None,
        }
    }

    pub fn reference_plane(&self) -> RefPlane {
        self.plane
    }

    pub fn with_reference_plane(&self, plane: RefPlane) -> Self {
        let mut next = self.clone();
        next.plane = plane;
        next
    }

    // ── Rigid moves ─────────────────────────────────────────────────────

    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Self {
        self.with_solid(transforms::translated(&self.solid, [dx, dy, dz]))
    }

    /// Rotate about the world axis through the origin, angle in degrees.
    pub fn rotate(&self, axis: Axis, degrees: f64) -> Result<Self, OpError> {
        let axis = match axis {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        };
        Ok(self.with_solid(transforms::rotated(&self.solid, [0.0; 3], axis, degrees)?))
    }

    // ── Booleans ────────────────────────────────────────────────────────

    pub fn union(&self, other: &Workpiece) -> Result<Self, OpError> {
        Ok(self.with_solid(booleans::fuse(&self.solid, &other.solid)?))
    }

    pub fn cut(&self, other: &Workpiece) -> Result<Self, OpError> {
        Ok(self.with_solid(booleans::cut(&self.solid, &other.solid)?))
    }

    pub fn intersect(&self, other: &Workpiece) -> Result<Self, OpError> {
        Ok(self.with_solid(booleans::common(&self.solid, &other.solid)?))
    }

    // ── Fillet / chamfer ────────────────────────────────────────────────

    /// Edge set a fillet or chamfer applies to: the selected edges, else
    /// every edge of the selected faces, else all edges.
    fn blend_targets(&self) -> Result<Vec<usize>, OpError> {
        match &self.selection {
            Selection::Edges(indices) => Ok(indices.clone()),
            Selection::Faces(face_indices) => {
                let mut edges = Vec::new();
                for &f in face_indices {
                    for e in introspect::face_edge_indices(&self.solid, f)? {
                        if !edges.contains(&e) {
                            edges.push(e);
                        }
                    }
                }
                Ok(edges)
            }
            Selection::None => Ok(introspect::edge_infos(&self.solid)
                .iter()
                .map(|e| e.index)
                .collect()),
        }
    }

    pub fn fillet(&self, radius: f64) -> Result<Self, OpError> {
        let edges = self.blend_targets()?;
        Ok(self.with_solid(fillets::fillet_edges(&self.solid, &edges, radius)?))
    }

    pub fn chamfer(&self, distance: f64) -> Result<Self, OpError> {
        let edges = self.blend_targets()?;
        Ok(self.with_solid(fillets::chamfer_edges(&self.solid, &edges, distance)?))
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Select faces by the closed selector grammar. A malformed selector
    /// yields an empty selection, never an error.
    pub fn faces(&self, selector: &str) -> Self {
        let indices = Selector::parse(selector)
            .map(|sel| sel.eval_faces(&introspect::face_infos(&self.solid)))
            .unwrap_or_default();
        let mut next = self.clone();
        next.selection = Selection::Faces(indices);
        next
    }

    /// Select edges by the closed selector grammar.
    pub fn edges(&self, selector: &str) -> Self {
        let indices = Selector::parse(selector)
            .map(|sel| sel.eval_edges(&introspect::edge_infos(&self.solid)))
            .unwrap_or_default();
        let mut next = self.clone();
        next.selection = Selection::Edges(indices);
        next
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn bounding_box(&self) -> Result<Aabb, OpError> {
        Ok(mesh::bounding_box(&self.solid)?)
    }

    pub fn volume(&self) -> Result<f64, OpError> {
        Ok(mesh::volume(&self.solid)?)
    }

    pub fn to_mesh(&self, tolerance: f64) -> Result<TriMesh, OpError> {
        Ok(mesh::tessellate(&self.solid, tolerance)?)
    }

    // ── Metadata ────────────────────────────────────────────────────────

    pub fn color(&self, hex: &str) -> Self {
        self.set_metadata("color", Value::String(hex.to_string()))
    }

    pub fn set_metadata(&self, key: &str, value: Value) -> Self {
        let mut next = self.clone();
        next.metadata.insert(key.to_string(), value);
        next
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }
}
