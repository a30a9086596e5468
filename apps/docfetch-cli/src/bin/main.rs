use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use docfetch_core::config::Config;
use docfetch_core::traits::SegmentReader;
use docfetch_core::types::SourceDocument;
use docfetch_fetch::{FetchPhase, PendingHit};
use docfetch_text::{TantivyIndexer, TantivySearchEngine};
use tracing_subscriber::EnvFilter;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} <ingest|query> [args...]", prog); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Reads one JSON document per line; blank lines are skipped.
fn read_documents(path: &Path) -> anyhow::Result<Vec<SourceDocument>> {
    let content = fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| serde_json::from_str(line).map_err(|e| anyhow::anyhow!("{}:{}: {}", path.display(), n + 1, e)))
        .collect()
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let index_dir = config.index_dir().unwrap_or_else(|_| PathBuf::from("dev_data/indexes/docfetch"));
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => {
            let Some(input) = args.first().map(PathBuf::from) else {
                eprintln!("Usage: docfetch ingest <documents.jsonl>"); std::process::exit(1)
            };
            let docs = read_documents(&input)?;
            let indexer = TantivyIndexer::new(index_dir.clone())?;
            let count = indexer.add_documents(&docs)?;
            tracing::info!(count, index_dir = %index_dir.display(), "ingest complete");
        }
        "query" => {
            let Some(query_text) = args.first() else {
                eprintln!("Usage: docfetch query \"<query>\" [limit]"); std::process::exit(1)
            };
            let limit = match args.get(1) {
                Some(raw) => raw.parse::<usize>().map_err(|e| anyhow::anyhow!("invalid limit '{}': {}", raw, e))?,
                None => 10,
            };
            let ctx = config.execution_context()?;
            let engine = TantivySearchEngine::new(index_dir)?;
            let candidates = engine.search(query_text, limit)?;
            let segments = engine.segments();
            let mut pending: Vec<PendingHit<'_>> = Vec::with_capacity(candidates.len());
            for c in candidates {
                let segment = segments
                    .get(c.segment_ord())
                    .ok_or_else(|| anyhow::anyhow!("hit {} points at unknown segment {}", c.hit.id, c.segment_ord()))?;
                let doc = c.doc();
                pending.push((c.hit, segment as &dyn SegmentReader, doc));
            }
            let hits = FetchPhase::default_phases().execute(&ctx, pending)?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
