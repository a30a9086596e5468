use docfetch_core::traits::SegmentReader;
use docfetch_core::types::{
    MappingConfig, ParentFieldConfig, SearchExecutionContext, SourceDocument, StoredFieldsContext, PARENT_FIELD_NAME,
};
use docfetch_fetch::{get_parent_id, FetchPhase, PendingHit};
use docfetch_text::{TantivyIndexer, TantivySearchEngine};
use tempfile::TempDir;

fn doc(id: &str, doc_type: &str, parent: Option<&str>, body: &str) -> SourceDocument {
    SourceDocument { id: id.into(), doc_type: doc_type.into(), parent: parent.map(Into::into), body: body.into() }
}

fn corpus() -> Vec<SourceDocument> {
    vec![
        doc("q1", "question", None, "how do fires start in a dry forest"),
        doc("a1", "answer", Some("q1"), "lightning often starts fires in a dry forest"),
        doc("a2", "answer", Some("q1"), "campfires left burning start forest fires"),
        doc("a3", "answer", None, "orphaned answer about forest fires"),
    ]
}

fn ctx() -> SearchExecutionContext {
    SearchExecutionContext::new(
        MappingConfig::new()
            .with_parent("answer", ParentFieldConfig::active(PARENT_FIELD_NAME))
            .with_parent("question", ParentFieldConfig::inactive()),
    )
}

fn fetch_all(engine: &TantivySearchEngine, ctx: &SearchExecutionContext, query: &str) -> Vec<docfetch_core::types::SearchHit> {
    let candidates = engine.search(query, 10).expect("search");
    let segments = engine.segments();
    let pending: Vec<PendingHit<'_>> = candidates
        .into_iter()
        .map(|c| {
            let reader: &dyn SegmentReader = &segments[c.segment_ord()];
            let doc = c.doc();
            (c.hit, reader, doc)
        })
        .collect();
    FetchPhase::default_phases().execute(ctx, pending).expect("fetch")
}

#[test]
fn parent_ids_come_back_from_fast_field_column() {
    let tmp = TempDir::new().unwrap();
    let index_dir = tmp.path().join("idx");
    let indexer = TantivyIndexer::new(index_dir.clone()).expect("indexer");
    assert_eq!(indexer.add_documents(&corpus()).expect("index"), 4);

    let engine = TantivySearchEngine::new(index_dir).expect("engine");
    let hits = fetch_all(&engine, &ctx(), "forest");
    assert_eq!(hits.len(), 4);
    for hit in &hits {
        let parent = hit.field(PARENT_FIELD_NAME).and_then(|f| f.first_str());
        match hit.id.as_str() {
            "a1" | "a2" => assert_eq!(parent, Some("q1"), "hit {}", hit.id),
            "q1" | "a3" => assert!(hit.fields_or_none().is_none(), "hit {}", hit.id),
            other => panic!("unexpected hit {}", other),
        }
    }
}

#[test]
fn hits_spread_over_segments_resolve_independently() {
    let indexer = TantivyIndexer::in_ram().expect("indexer");
    indexer.add_documents(&corpus()[..2]).expect("first batch");
    indexer.add_documents(&[doc("c1", "answer", Some("q9"), "a forest answer in a later segment")]).expect("second batch");

    let engine = TantivySearchEngine::from_index(indexer.index().clone()).expect("engine");
    assert!(!engine.segments().is_empty());
    let hits = fetch_all(&engine, &ctx(), "forest");
    let mut parents: Vec<(String, Option<String>)> = hits
        .iter()
        .map(|h| (h.id.clone(), h.field(PARENT_FIELD_NAME).and_then(|f| f.first_str()).map(str::to_string)))
        .collect();
    parents.sort();
    assert_eq!(
        parents,
        vec![
            ("a1".to_string(), Some("q1".to_string())),
            ("c1".to_string(), Some("q9".to_string())),
            ("q1".to_string(), None),
        ]
    );
}

#[test]
fn disabled_fetching_leaves_tantivy_hits_bare() {
    let indexer = TantivyIndexer::in_ram().expect("indexer");
    indexer.add_documents(&corpus()).expect("index");
    let engine = TantivySearchEngine::from_index(indexer.index().clone()).expect("engine");
    let ctx = ctx().with_stored_fields(StoredFieldsContext::from_list(["_none_"]).expect("stored"));
    let hits = fetch_all(&engine, &ctx, "lightning");
    assert_eq!(hits.len(), 1);
    assert!(hits[0].fields_or_none().is_none());
}

#[test]
fn segment_without_parent_column_reports_absence() {
    let indexer = TantivyIndexer::in_ram().expect("indexer");
    indexer.add_documents(&[doc("q1", "question", None, "no parents here")]).expect("index");
    let engine = TantivySearchEngine::from_index(indexer.index().clone()).expect("engine");
    let config = ParentFieldConfig::active(PARENT_FIELD_NAME);
    for segment in engine.segments() {
        assert!(segment.max_doc() >= 1);
        assert_eq!(get_parent_id(&config, &segment, 0).expect("no fault"), None);
        assert!(segment.sorted_values("no_such_field").expect("lookup").is_none());
    }
}
