//! Exposes tantivy segments through the fetch phase's segment seam.
//!
//! A string fast field is stored by tantivy as a sorted dictionary plus a
//! per-document ordinal column, which is exactly the shape the fetch phase
//! reads parent ids from.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

use tantivy::columnar::StrColumn;

use docfetch_core::error::{Error, Result};
use docfetch_core::traits::{ColumnarValueStore, SegmentReader};
use docfetch_core::types::DocOrdinal;

struct StrColumnStore(StrColumn);

impl ColumnarValueStore for StrColumnStore {
	fn term_ord(&self, doc: DocOrdinal) -> io::Result<Option<u64>> {
		Ok(self.0.term_ords(doc).next())
	}

	fn ord_to_bytes(&self, ord: u64, out: &mut Vec<u8>) -> io::Result<bool> {
		self.0.ord_to_bytes(ord, out)
	}

	fn num_terms(&self) -> u64 { self.0.num_terms() as u64 }
}

type CachedColumn = Option<Arc<dyn ColumnarValueStore>>;

pub struct TantivySegment {
	reader: tantivy::SegmentReader,
	// Columns are opened on first use; a cached `None` means the segment has none.
	columns: RwLock<HashMap<String, CachedColumn>>,
}

impl TantivySegment {
	pub fn new(reader: tantivy::SegmentReader) -> Self {
		Self { reader, columns: RwLock::new(HashMap::new()) }
	}

	pub fn from_searcher(searcher: &tantivy::Searcher) -> Vec<Self> {
		searcher.segment_readers().iter().cloned().map(Self::new).collect()
	}

	fn open_column(&self, field: &str) -> Result<CachedColumn> {
		let column = self
			.reader
			.fast_fields()
			.str(field)
			.map_err(|e| Error::storage(format!("opening column '{}' of segment {}", field, self.segment_id()), e))?;
		Ok(column.map(|c| Arc::new(StrColumnStore(c)) as Arc<dyn ColumnarValueStore>))
	}
}

impl SegmentReader for TantivySegment {
	fn segment_id(&self) -> String { self.reader.segment_id().short_uuid_string() }

	fn max_doc(&self) -> DocOrdinal { self.reader.max_doc() }

	fn sorted_values(&self, field: &str) -> Result<Option<Arc<dyn ColumnarValueStore>>> {
		let poisoned = || Error::Operation(format!("column cache of segment {} is poisoned", self.segment_id()));
		if let Some(cached) = self.columns.read().map_err(|_| poisoned())?.get(field) {
			return Ok(cached.clone());
		}
		let column = self.open_column(field)?;
		self.columns.write().map_err(|_| poisoned())?.insert(field.to_string(), column.clone());
		Ok(column)
	}
}
