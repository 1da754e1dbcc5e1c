//! Fillet and chamfer entry points.
//!
//! truck has no blend surfaces; both operations report
//! [`KernelError::NotSupported`] so callers get a typed failure instead of
//! silently unchanged geometry.

use crate::solid::Solid;
use crate::types::KernelError;

/// Round the given edges with `radius`.
pub fn fillet_edges(
    _solid: &Solid,
    edge_indices: &[usize],
    radius: f64,
) -> Result<Solid, KernelError> {
    if edge_indices.is_empty() {
        return Err(KernelError::InvalidInput {
            reason: "no edges to fillet".to_string(),
        });
    }
    if radius <= 0.0 {
        return Err(KernelError::InvalidInput {
            reason: format!("fillet radius must be positive, got {radius}"),
        });
    }
    Err(KernelError::NotSupported {
        operation: "fillet_edges",
    })
}

/// Bevel the given edges with `distance`.
pub fn chamfer_edges(
    _solid: &Solid,
    edge_indices: &[usize],
    distance: f64,
) -> Result<Solid, KernelError> {
    if edge_indices.is_empty() {
        return Err(KernelError::InvalidInput {
            reason: "no edges to chamfer".to_string(),
        });
    }
    if distance <= 0.0 {
        return Err(KernelError::InvalidInput {
            reason: format!("chamfer distance must be positive, got {distance}"),
        });
    }
    Err(KernelError::NotSupported {
        operation: "chamfer_edges",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn fillet_reports_not_supported() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        let result = fillet_edges(&solid, &[0, 1], 0.2);
        assert!(matches!(result, Err(KernelError::NotSupported { .. })));
    }

    #[test]
    fn fillet_with_no_edges_is_invalid_input() {
        let solid = primitives::cuboid(1.0, 1.0, 1.0).unwrap();
        let result = fillet_edges(&solid, &[], 0.2);
        assert!(matches!(result, Err(KernelError::InvalidInput { .. })));
    }
}
