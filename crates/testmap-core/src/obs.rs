//! Structured observability hooks for ownership mapping.
//!
//! Every helper emits a single event carrying an `event = "..."` field so
//! log pipelines can filter on it. Per-test events are `debug!` to keep
//! corpus runs quiet at the default level.

use tracing::{debug, info, warn};

use crate::resolution::ResolutionStage;

/// Span covering one corpus mapping, tagged with the digest of the rule set
/// in use. Workers enter a clone of it so per-test events carry the digest.
pub fn mapping_span(config_digest: &str) -> tracing::Span {
    tracing::info_span!("testmap.mapping", config_digest = %config_digest)
}

/// Emit event: components loaded from a configuration source.
pub fn emit_components_loaded(source: &str, count: usize) {
    info!(event = "config.loaded", source = %source, components = count);
}

/// Emit event: a matcher with no predicates, which claims every test.
pub fn emit_catch_all_matcher(component: &str, index: usize) {
    warn!(
        event = "config.catch_all_matcher",
        component = %component,
        matcher_index = index,
        "matcher has no predicates and matches every test"
    );
}

/// Emit event: a test resolved against a component.
pub fn emit_match_resolved(component: &str, test: &str, stage: ResolutionStage, priority: i32) {
    debug!(
        event = "match.resolved",
        component = %component,
        test = %test,
        stage = %stage,
        priority = priority,
    );
}

/// Emit event: several components claim a test at the same priority.
pub fn emit_ownership_ambiguous(test: &str, components: &[String]) {
    warn!(
        event = "match.ambiguous",
        test = %test,
        components = ?components,
    );
}

/// Emit event: a corpus finished mapping.
pub fn emit_corpus_mapped(
    total: usize,
    owned: usize,
    unowned: usize,
    ambiguous: usize,
    duration_ms: u64,
) {
    info!(
        event = "corpus.mapped",
        total = total,
        owned = owned,
        unowned = unowned,
        ambiguous = ambiguous,
        duration_ms = duration_ms,
    );
}
