use anyhow::Result;
use std::path::PathBuf;
use tantivy::{Index, IndexWriter, TantivyDocument};
use tracing::info;

use docfetch_core::types::{SourceDocument, PARENT_FIELD_NAME};

use crate::tantivy_utils::{build_schema, register_tokenizer, BODY_FIELD, ID_FIELD, TYPE_FIELD};

pub struct TantivyIndexer {
	index: Index,
	id_field: tantivy::schema::Field,
	type_field: tantivy::schema::Field,
	parent_field: tantivy::schema::Field,
	body_field: tantivy::schema::Field,
}

impl TantivyIndexer {
	/// Creates a fresh index in `index_dir`, wiping whatever was there.
	pub fn new(index_dir: PathBuf) -> Result<Self, anyhow::Error> {
		if index_dir.exists() { std::fs::remove_dir_all(&index_dir)?; }
		std::fs::create_dir_all(&index_dir)?;
		let index = Index::create_in_dir(&index_dir, build_schema())?;
		Self::from_index(index)
	}

	pub fn in_ram() -> Result<Self, anyhow::Error> {
		Self::from_index(Index::create_in_ram(build_schema()))
	}

	fn from_index(index: Index) -> Result<Self, anyhow::Error> {
		register_tokenizer(&index);
		let schema = index.schema();
		let id_field = schema.get_field(ID_FIELD)?;
		let type_field = schema.get_field(TYPE_FIELD)?;
		let parent_field = schema.get_field(PARENT_FIELD_NAME)?;
		let body_field = schema.get_field(BODY_FIELD)?;
		Ok(Self { index, id_field, type_field, parent_field, body_field })
	}

	pub fn index(&self) -> &Index { &self.index }

	/// Adds `docs` and commits them as one batch. Documents without a parent
	/// get no entry in the parent column.
	pub fn add_documents(&self, docs: &[SourceDocument]) -> Result<usize> {
		let mut index_writer: IndexWriter = self.index.writer(50_000_000)?;
		for d in docs {
			let mut doc = TantivyDocument::default();
			doc.add_text(self.id_field, &d.id);
			doc.add_text(self.type_field, &d.doc_type);
			if let Some(parent) = &d.parent { doc.add_text(self.parent_field, parent); }
			doc.add_text(self.body_field, &d.body);
			index_writer.add_document(doc)?;
		}
		index_writer.commit()?;
		info!(docs = docs.len(), "committed batch");
		Ok(docs.len())
	}
}
