//! Attaches the parent document id to hits of types mapped with a parent.
//!
//! The parent reference is not part of the document body. It lives in a
//! sorted value column of the hit's segment, keyed by document ordinal, and
//! is copied into the hit's fields under the configured field name.

use serde_json::Value;
use tracing::{debug, trace};

use docfetch_core::error::{Error, Result};
use docfetch_core::traits::{FetchSubPhase, SegmentReader};
use docfetch_core::types::{DocOrdinal, DocumentField, HitContext, ParentFieldConfig, SearchExecutionContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParentIdResolver;

impl ParentIdResolver {
    pub fn new() -> Self { Self }
}

impl FetchSubPhase for ParentIdResolver {
    fn name(&self) -> &'static str { "parent_id" }

    fn hit_execute(&self, ctx: &SearchExecutionContext, hit: &mut HitContext<'_>) -> Result<()> {
        if ctx.fetch_fields_disabled() {
            return Ok(());
        }
        let doc_type = hit.hit().doc_type.as_str();
        let config = match ctx.mappings.parent_field(doc_type) {
            Some(config) if config.active => config,
            Some(_) => return Ok(()),
            None => {
                debug!(doc_type, hit = %hit.hit().id, "no mapping for document type, skipping parent id");
                return Ok(());
            }
        };

        let Some(parent_id) = get_parent_id(config, hit.reader(), hit.doc())? else {
            // Nested inner hits of a parent/child document land here.
            trace!(hit = %hit.hit().id, doc = hit.doc(), "hit has no parent id");
            return Ok(());
        };

        let field_name = config.field_name.clone();
        hit.hit_mut()
            .fields_mut_or_insert()
            .insert(field_name.clone(), DocumentField::single(field_name, Value::String(parent_id)));
        Ok(())
    }
}

/// Reads the parent id of `doc` from `reader`.
///
/// Returns `Ok(None)` when the segment has no column for the field, the
/// document has no entry, or the stored value is empty. Read failures become
/// [`Error::Storage`].
pub fn get_parent_id(
    config: &ParentFieldConfig,
    reader: &dyn SegmentReader,
    doc: DocOrdinal,
) -> Result<Option<String>> {
    let field = config.field_name.as_str();
    let Some(column) = reader.sorted_values(field)? else {
        return Ok(None);
    };
    let storage_fault = |e: std::io::Error| {
        Error::storage(format!("reading '{}' of doc {} in segment {}", field, doc, reader.segment_id()), e)
    };
    let Some(ord) = column.term_ord(doc).map_err(storage_fault)? else {
        return Ok(None);
    };
    let mut bytes = Vec::new();
    if !column.ord_to_bytes(ord, &mut bytes).map_err(storage_fault)? {
        return Ok(None);
    }
    // An empty value is how writers mark "no parent".
    let parent_id = String::from_utf8_lossy(&bytes).into_owned();
    Ok((!parent_id.is_empty()).then_some(parent_id))
}
