//! Fluent shape algebra: the immutable [`Workpiece`] value.
//!
//! A `Workpiece` carries a kernel solid, an informational reference plane,
//! a face/edge selection, and opaque metadata. Every operation returns a
//! fresh value; operations that rebuild the solid clear the selection.

pub mod error;
pub mod selector;
pub mod workpiece;

pub use error::OpError;
pub use selector::Selector;
pub use workpiece::{Selection, Workpiece};
