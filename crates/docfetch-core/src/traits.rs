use std::io;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{DocOrdinal, HitContext, SearchExecutionContext};

/// Per-segment, per-field sorted dictionary of byte strings.
///
/// Every document maps to at most one dictionary ordinal. Implementations are
/// read-only and shared by all hits of all requests touching the segment.
pub trait ColumnarValueStore: Send + Sync {
    /// Dictionary ordinal stored for `doc`, or `None` when the document has no entry.
    fn term_ord(&self, doc: DocOrdinal) -> io::Result<Option<u64>>;

    /// Writes the bytes of dictionary entry `ord` into `out`, replacing its
    /// contents. Returns `false` if `ord` is out of range.
    fn ord_to_bytes(&self, ord: u64, out: &mut Vec<u8>) -> io::Result<bool>;

    /// Number of distinct values in the dictionary.
    fn num_terms(&self) -> u64;
}

pub trait SegmentReader: Send + Sync {
    fn segment_id(&self) -> String;
    fn max_doc(&self) -> DocOrdinal;

    /// Sorted value column for `field`, or `None` when this segment holds no
    /// column under that name.
    fn sorted_values(&self, field: &str) -> Result<Option<Arc<dyn ColumnarValueStore>>>;
}

/// One step of the fetch phase, run once per hit.
pub trait FetchSubPhase: Send + Sync {
    fn name(&self) -> &'static str;
    fn hit_execute(&self, ctx: &SearchExecutionContext, hit: &mut HitContext<'_>) -> Result<()>;
}
