//! Shared helpers for the end-to-end scenario and property tests.
//!
//! The scenario tests drive the whole stack — shape algebra, face frames,
//! layout, cutters, booleans — against the real kernel, so everything
//! here works on tessellated output rather than topology.

pub mod helpers;

pub use helpers::{assert_near, planar_area_at, relative_error};
