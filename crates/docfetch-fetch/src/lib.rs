//! docfetch-fetch
//!
//! The fetch phase: sub-phases that materialize fields on hits after the
//! query phase has picked them. See `parent_id` for the parent-id resolver.

pub mod parent_id;
pub mod phase;

pub use parent_id::{get_parent_id, ParentIdResolver};
pub use phase::{FetchPhase, PendingHit};
