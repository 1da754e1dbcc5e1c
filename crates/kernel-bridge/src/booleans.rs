//! Boolean operations over truck's shape operators.
//!
//! truck only offers the 2-argument overloads (`or`/`and`); the list-style
//! entry points below build on them: `fuse_all` merges overlapping members
//! and falls back to a compound when a merge fails, and `cut_all`
//! subtracts every member in sequence, which distributes identically to
//! subtracting the fused union.

use crate::mesh;
use crate::solid::Solid;
use crate::types::{Aabb, KernelError};

/// Tolerance handed to truck's boolean operators.
pub const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Boolean union of two solids.
pub fn fuse(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::or(&a.inner, &b.inner, BOOLEAN_TOLERANCE)
        .map(Solid::new)
        .ok_or_else(|| KernelError::BooleanFailed {
            op: "fuse",
            reason: "kernel returned no result".to_string(),
        })
}

/// Boolean subtraction: `a` minus `b`.
pub fn cut(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    // Subtraction = A ∩ ¬B. not() mutates in place.
    let mut complement = b.inner.clone();
    complement.not();
    let result = truck_shapeops::and(&a.inner, &complement, BOOLEAN_TOLERANCE).ok_or_else(|| {
        KernelError::BooleanFailed {
            op: "cut",
            reason: "kernel returned no result".to_string(),
        }
    })?;
    if result.boundaries().is_empty() {
        return Err(KernelError::EmptyResult { op: "cut" });
    }
    Ok(Solid::new(result))
}

/// Boolean intersection of two solids.
pub fn common(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::and(&a.inner, &b.inner, BOOLEAN_TOLERANCE)
        .map(Solid::new)
        .ok_or_else(|| KernelError::BooleanFailed {
            op: "common",
            reason: "kernel returned no result".to_string(),
        })
}

/// Result of fusing a list of solids: one merged solid, or a compound of
/// the members that could not (or did not need to) be merged.
#[derive(Debug, Clone)]
pub enum Fused {
    Single(Solid),
    Compound(Vec<Solid>),
}

impl Fused {
    pub fn member_count(&self) -> usize {
        match self {
            Fused::Single(_) => 1,
            Fused::Compound(members) => members.len(),
        }
    }

    pub fn members(&self) -> Vec<&Solid> {
        match self {
            Fused::Single(s) => vec![s],
            Fused::Compound(members) => members.iter().collect(),
        }
    }

    pub fn into_members(self) -> Vec<Solid> {
        match self {
            Fused::Single(s) => vec![s],
            Fused::Compound(members) => members,
        }
    }
}

/// Outcome of [`fuse_all`].
#[derive(Debug, Clone)]
pub struct FuseOutcome {
    pub fused: Fused,
    /// True when a pairwise fuse reported failure and the members were kept
    /// as a compound instead.
    pub fell_back: bool,
}

/// Fuse a list of solids.
///
/// Members whose bounding boxes overlap are merged pairwise; disjoint
/// members stay separate (a compound), which downstream subtraction treats
/// identically. A failed merge keeps both members and flags the fallback.
pub fn fuse_all(solids: Vec<Solid>) -> Result<FuseOutcome, KernelError> {
    if solids.is_empty() {
        return Err(KernelError::InvalidInput {
            reason: "fuse_all called with no solids".to_string(),
        });
    }

    let mut groups: Vec<(Solid, Aabb)> = Vec::new();
    let mut fell_back = false;

    for solid in solids {
        let bbox = mesh::bounding_box(&solid)?;
        let overlapping = groups.iter().position(|(_, gb)| gb.overlaps(&bbox));
        match overlapping {
            Some(i) => match fuse(&groups[i].0, &solid) {
                Ok(merged) => {
                    let merged_bb = Aabb::from_points([groups[i].1.min, groups[i].1.max, bbox.min, bbox.max])
                        .unwrap_or(bbox);
                    groups[i] = (merged, merged_bb);
                }
                Err(_) => {
                    fell_back = true;
                    groups.push((solid, bbox));
                }
            },
            None => groups.push((solid, bbox)),
        }
    }

    let fused = if groups.len() == 1 {
        Fused::Single(groups.remove(0).0)
    } else {
        Fused::Compound(groups.into_iter().map(|(s, _)| s).collect())
    };
    Ok(FuseOutcome { fused, fell_back })
}

/// Subtract every member of a fused set from `target`, in sequence.
pub fn cut_all(target: &Solid, tools: &Fused) -> Result<Solid, KernelError> {
    let mut acc = target.clone();
    for tool in tools.members() {
        acc = cut(&acc, tool)?;
    }
    Ok(acc)
}

/// Intersect every member of a fused set with `clip`, preserving the
/// compound structure.
pub fn common_each(tools: Fused, clip: &Solid) -> Result<Fused, KernelError> {
    match tools {
        Fused::Single(s) => Ok(Fused::Single(common(&s, clip)?)),
        Fused::Compound(members) => {
            let mut clipped = Vec::with_capacity(members.len());
            for member in &members {
                clipped.push(common(member, clip)?);
            }
            Ok(Fused::Compound(clipped))
        }
    }
}
