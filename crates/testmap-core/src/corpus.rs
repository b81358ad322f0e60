//! Corpus mapping: attribute every test in a corpus against a registry.
//!
//! Resolution is pure, so the corpus is split into chunks that are resolved
//! on blocking workers in parallel and reassembled in input order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{MappingError, Result, TestInfo};
use crate::obs::{emit_corpus_mapped, mapping_span};
use crate::registry::{ComponentRegistry, TestOwnership};

/// How a single test was attributed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Attribution {
    Owned { owner: TestOwnership },
    Unowned,
    Ambiguous { components: Vec<String> },
}

/// One row of a mapping report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingEntry {
    pub test: TestInfo,
    /// Oldest known name of the test, after following renames.
    pub oldest_name: String,
    pub attribution: Attribution,
}

/// Counts per attribution outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingSummary {
    pub total: usize,
    pub owned: usize,
    pub unowned: usize,
    pub ambiguous: usize,
}

impl MappingSummary {
    fn from_entries(entries: &[MappingEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match entry.attribution {
                Attribution::Owned { .. } => summary.owned += 1,
                Attribution::Unowned => summary.unowned += 1,
                Attribution::Ambiguous { .. } => summary.ambiguous += 1,
            }
        }
        summary
    }
}

/// Result of mapping a corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    pub generated_at: DateTime<Utc>,
    pub config_digest: String,
    pub summary: MappingSummary,
    pub entries: Vec<MappingEntry>,
}

impl ComponentRegistry {
    /// Attribute a single test. Ambiguous ownership is an outcome, not an
    /// error; any other identification failure is returned.
    pub fn attribute(&self, test: &TestInfo) -> Result<MappingEntry> {
        let attribution = match self.identify(test) {
            Ok(Some(owner)) => Attribution::Owned { owner },
            Ok(None) => Attribution::Unowned,
            Err(MappingError::AmbiguousOwnership { components, .. }) => {
                Attribution::Ambiguous { components }
            }
            Err(other) => return Err(other),
        };
        Ok(MappingEntry {
            test: test.clone(),
            oldest_name: self.oldest_name(&test.name),
            attribution,
        })
    }
}

/// Map a corpus of tests across up to `concurrency` blocking workers.
///
/// Every event emitted while mapping, on any worker, is recorded inside the
/// `testmap.mapping` span carrying the config digest.
pub async fn map_corpus(
    registry: Arc<ComponentRegistry>,
    tests: Vec<TestInfo>,
    concurrency: usize,
) -> Result<MappingReport> {
    let config_digest = registry.config_digest()?;
    let span = mapping_span(&config_digest);
    let start = Instant::now();

    let workers = concurrency.max(1);
    let chunk_size = tests.len().div_ceil(workers).max(1);

    let handles = tests
        .chunks(chunk_size)
        .map(|chunk| {
            let registry = Arc::clone(&registry);
            let chunk = chunk.to_vec();
            let span = span.clone();
            tokio::task::spawn_blocking(move || {
                let _entered = span.enter();
                chunk
                    .iter()
                    .map(|test| registry.attribute(test))
                    .collect::<Result<Vec<_>>>()
            })
        })
        .collect::<Vec<_>>();

    let mut entries: Vec<MappingEntry> = Vec::with_capacity(tests.len());
    for chunk in futures::future::try_join_all(handles)
        .await
        .map_err(|e| MappingError::Worker(e.to_string()))?
    {
        entries.extend(chunk?);
    }

    let summary = MappingSummary::from_entries(&entries);
    span.in_scope(|| {
        emit_corpus_mapped(
            summary.total,
            summary.owned,
            summary.unowned,
            summary.ambiguous,
            start.elapsed().as_millis() as u64,
        )
    });

    Ok(MappingReport {
        generated_at: Utc::now(),
        config_digest,
        summary,
        entries,
    })
}
