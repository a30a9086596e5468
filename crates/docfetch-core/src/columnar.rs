//! In-memory sorted-dictionary columns and a segment that serves them.
//!
//! The layout mirrors what an on-disk columnar segment keeps for a string
//! field: a deduplicated, sorted dictionary of byte strings plus an optional
//! index from document ordinal to dictionary ordinal.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::{ColumnarValueStore, SegmentReader};
use crate::types::DocOrdinal;

#[derive(Debug, Clone, Default)]
pub struct SortedDictionaryColumn {
    dictionary: Vec<Vec<u8>>,
    // (doc, ord) sorted by doc; docs without a value are absent.
    doc_ords: Vec<(DocOrdinal, u64)>,
}

impl SortedDictionaryColumn {
    /// Builds a column from `(doc, value)` pairs. A document may carry at most
    /// one value.
    pub fn build<I, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DocOrdinal, V)>,
        V: AsRef<[u8]>,
    {
        let mut rows: Vec<(DocOrdinal, Vec<u8>)> =
            entries.into_iter().map(|(doc, v)| (doc, v.as_ref().to_vec())).collect();
        rows.sort_by_key(|(doc, _)| *doc);
        if let Some(w) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::Operation(format!("document {} has more than one value", w[0].0)));
        }

        let dictionary: Vec<Vec<u8>> =
            rows.iter().map(|(_, v)| v.clone()).collect::<BTreeSet<_>>().into_iter().collect();
        let mut doc_ords = Vec::with_capacity(rows.len());
        for (doc, value) in rows {
            let ord = dictionary
                .binary_search(&value)
                .map_err(|_| Error::Operation(format!("value of document {} missing from dictionary", doc)))?;
            doc_ords.push((doc, ord as u64));
        }
        Ok(Self { dictionary, doc_ords })
    }

    pub fn num_docs_with_value(&self) -> usize { self.doc_ords.len() }
}

impl ColumnarValueStore for SortedDictionaryColumn {
    fn term_ord(&self, doc: DocOrdinal) -> io::Result<Option<u64>> {
        Ok(self
            .doc_ords
            .binary_search_by_key(&doc, |(d, _)| *d)
            .ok()
            .map(|idx| self.doc_ords[idx].1))
    }

    fn ord_to_bytes(&self, ord: u64, out: &mut Vec<u8>) -> io::Result<bool> {
        match usize::try_from(ord).ok().and_then(|i| self.dictionary.get(i)) {
            Some(bytes) => {
                out.clear();
                out.extend_from_slice(bytes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn num_terms(&self) -> u64 { self.dictionary.len() as u64 }
}

/// A segment whose columns live in memory. Columns are registered once and
/// then shared read-only.
#[derive(Clone, Default)]
pub struct InMemorySegment {
    id: String,
    max_doc: DocOrdinal,
    columns: HashMap<String, Arc<dyn ColumnarValueStore>>,
}

impl InMemorySegment {
    pub fn new(id: impl Into<String>, max_doc: DocOrdinal) -> Self {
        Self { id: id.into(), max_doc, columns: HashMap::new() }
    }

    pub fn with_column(mut self, field: impl Into<String>, column: impl ColumnarValueStore + 'static) -> Self {
        self.columns.insert(field.into(), Arc::new(column));
        self
    }

    pub fn with_shared_column(mut self, field: impl Into<String>, column: Arc<dyn ColumnarValueStore>) -> Self {
        self.columns.insert(field.into(), column);
        self
    }
}

impl SegmentReader for InMemorySegment {
    fn segment_id(&self) -> String { self.id.clone() }

    fn max_doc(&self) -> DocOrdinal { self.max_doc }

    fn sorted_values(&self, field: &str) -> Result<Option<Arc<dyn ColumnarValueStore>>> {
        Ok(self.columns.get(field).cloned())
    }
}
