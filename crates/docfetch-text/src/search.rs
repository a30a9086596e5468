use anyhow::Result;
use tantivy::{Index, DocAddress, collector::TopDocs, query::QueryParser, TantivyDocument};
use tantivy::schema::Value;
use tracing::debug;

use docfetch_core::types::{DocOrdinal, SearchHit};

use crate::segment::TantivySegment;
use crate::tantivy_utils::{BODY_FIELD, ID_FIELD, TYPE_FIELD};

pub struct TantivySearchEngine {
	index: Index,
	searcher: tantivy::Searcher,
	id_field: tantivy::schema::Field,
	type_field: tantivy::schema::Field,
	body_field: tantivy::schema::Field,
}

/// A query-phase result: the hit plus where it lives, for the fetch phase.
#[derive(Debug, Clone)]
pub struct Candidate {
	pub hit: SearchHit,
	pub address: DocAddress,
}

impl Candidate {
	pub fn segment_ord(&self) -> usize { self.address.segment_ord as usize }
	pub fn doc(&self) -> DocOrdinal { self.address.doc_id }
}

impl TantivySearchEngine {
	pub fn new(index_dir: std::path::PathBuf) -> Result<Self, anyhow::Error> {
		Self::from_index(Index::open_in_dir(&index_dir)?)
	}

	pub fn from_index(index: Index) -> Result<Self, anyhow::Error> {
		crate::tantivy_utils::register_tokenizer(&index);
		let reader = index.reader()?; let searcher = reader.searcher();
		let schema = index.schema();
		let id_field = schema.get_field(ID_FIELD)?;
		let type_field = schema.get_field(TYPE_FIELD)?;
		let body_field = schema.get_field(BODY_FIELD)?;
		Ok(Self { index, searcher, id_field, type_field, body_field })
	}

	/// One `TantivySegment` per segment of the searcher, in segment-ordinal order.
	pub fn segments(&self) -> Vec<TantivySegment> { TantivySegment::from_searcher(&self.searcher) }

	pub fn search(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>, anyhow::Error> {
		let query_parser = QueryParser::for_index(&self.index, vec![self.body_field]);
		let query = query_parser.parse_query(query_text)?;
		let top_docs = self.searcher.search(&query, &TopDocs::with_limit(limit))?;
		debug!(query = query_text, hits = top_docs.len(), "query phase done");
		let mut candidates = Vec::with_capacity(top_docs.len());
		for (score, address) in top_docs {
			let doc: TantivyDocument = self.searcher.doc(address)?;
			let id = doc.get_first(self.id_field).and_then(|v| v.as_str()).unwrap_or("");
			let doc_type = doc.get_first(self.type_field).and_then(|v| v.as_str()).unwrap_or("");
			candidates.push(Candidate { hit: SearchHit::new(id, doc_type, score), address });
		}
		Ok(candidates)
	}
}
