//! testmap Core - component ownership resolution for CI test results
//!
//! Attributes tests to the components (teams, subsystems) that own them:
//! - Resolves a test against one component through ordered stages
//!   (Jira tag, operator test, matchers, namespace ownership)
//! - Loads component definitions from JSON/TOML configuration
//! - Arbitrates ownership across a registry of components by priority
//! - Maps whole corpora in parallel into a serializable report

pub mod component;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod matcher;
pub mod namespace;
pub mod obs;
pub mod registry;
pub mod resolution;
pub mod signals;
pub mod telemetry;

pub use component::Component;
pub use config::{
    load_components, parse_components, validate_components, ComponentsFile, ConfigFormat,
};
pub use corpus::{map_corpus, Attribution, MappingEntry, MappingReport, MappingSummary};
pub use domain::{MappingError, Result, TestInfo};
pub use matcher::ComponentMatcher;
pub use namespace::extract_namespace;
pub use obs::{
    emit_catch_all_matcher, emit_components_loaded, emit_corpus_mapped, emit_match_resolved,
    emit_ownership_ambiguous, mapping_span,
};
pub use registry::{ComponentRegistry, TestOwnership};
pub use resolution::{resolve, Resolution, ResolutionStage, JIRA_TAG_FIELD, NAMESPACE_PRIORITY};
pub use signals::{unquote, DefaultSignals, TestSignals};
pub use telemetry::init_tracing;
