//! Typed façade over the truck BREP kernel.
//!
//! Exposes only what the pattern-cutting core needs: primitive solids,
//! profile → wire → face → prism builders, booleans (including the
//! list-style fuse/cut with compound fallback), rigid transforms,
//! tessellation with volume and bounding-box queries, and read-only face
//! and edge introspection. It never interprets geometry beyond reporting.
//!
//! Kernel failures (builder not done, boolean with no result, empty
//! output) are translated into [`KernelError`]; no truck types leak out.

pub mod booleans;
pub mod fillets;
pub mod introspect;
pub mod mesh;
pub mod primitives;
pub mod profiles;
pub mod solid;
pub mod transforms;
pub mod types;

pub use booleans::{Fused, FuseOutcome, BOOLEAN_TOLERANCE};
pub use introspect::{EdgeInfo, FaceInfo};
pub use profiles::Seg;
pub use solid::Solid;
pub use types::{Aabb, KernelError, TriMesh};
