use tracing::debug_span;

use docfetch_core::error::Result;
use docfetch_core::traits::{FetchSubPhase, SegmentReader};
use docfetch_core::types::{DocOrdinal, HitContext, SearchExecutionContext, SearchHit};

use crate::parent_id::ParentIdResolver;

/// A hit waiting to be fetched, with the segment and ordinal it was found at.
pub type PendingHit<'a> = (SearchHit, &'a dyn SegmentReader, DocOrdinal);

/// Runs every registered sub-phase over each hit, in registration order.
#[derive(Default)]
pub struct FetchPhase {
    sub_phases: Vec<Box<dyn FetchSubPhase>>,
}

impl FetchPhase {
    pub fn new() -> Self { Self::default() }

    pub fn default_phases() -> Self {
        Self::new().with_sub_phase(Box::new(ParentIdResolver::new()))
    }

    pub fn with_sub_phase(mut self, sub_phase: Box<dyn FetchSubPhase>) -> Self {
        self.sub_phases.push(sub_phase);
        self
    }

    pub fn sub_phase_names(&self) -> Vec<&'static str> {
        self.sub_phases.iter().map(|p| p.name()).collect()
    }

    /// Fetches all hits. The first sub-phase error fails the whole request.
    pub fn execute(&self, ctx: &SearchExecutionContext, hits: Vec<PendingHit<'_>>) -> Result<Vec<SearchHit>> {
        let mut out = Vec::with_capacity(hits.len());
        for (hit, reader, doc) in hits {
            let span = debug_span!("fetch_hit", hit = %hit.id, segment = %reader.segment_id(), doc);
            let _enter = span.enter();
            let mut hit_ctx = HitContext::new(hit, reader, doc);
            for sub_phase in &self.sub_phases {
                sub_phase.hit_execute(ctx, &mut hit_ctx)?;
            }
            out.push(hit_ctx.into_hit());
        }
        Ok(out)
    }
}
