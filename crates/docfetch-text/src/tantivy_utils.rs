use tantivy::schema::{Schema, TextFieldIndexing, TextOptions, IndexRecordOption, FAST, STRING, STORED};
use tantivy::tokenizer::{TextAnalyzer, SimpleTokenizer, LowerCaser, StopWordFilter};
use tantivy::Index;

use docfetch_core::types::PARENT_FIELD_NAME;

pub const ID_FIELD: &str = "id";
pub const TYPE_FIELD: &str = "type";
pub const BODY_FIELD: &str = "body";
pub const BODY_TOKENIZER: &str = "body_with_stopwords";

/// `_parent` is a fast field: its values go to the segment's sorted string
/// column, which is where the fetch phase reads them back from.
pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	schema_builder.add_text_field(ID_FIELD, STRING | STORED);
	schema_builder.add_text_field(TYPE_FIELD, STRING | STORED);
	schema_builder.add_text_field(PARENT_FIELD_NAME, STRING | FAST);
	let body_indexing = TextFieldIndexing::default().set_tokenizer(BODY_TOKENIZER).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let body_options = TextOptions::default().set_indexing_options(body_indexing).set_stored();
	schema_builder.add_text_field(BODY_FIELD, body_options);
	schema_builder.build()
}

pub fn register_tokenizer(index: &Index) {
	let stop_words = vec![
		"a","an","and","are","as","at","be","by","for","from","has","in","is","it","its","of","on","that","the","to","was","with","or","but","not","this",
	];
	let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(stop_words.into_iter().map(|s| s.to_string())))
		.build();
	index.tokenizers().register(BODY_TOKENIZER, tokenizer);
}
