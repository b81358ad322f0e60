//! Caller-owned collection of components with cross-component arbitration.
//!
//! Resolution answers "does this component own the test?" one component at a
//! time. The registry asks every component and picks the owner: the highest
//! priority wins, and a tie at the top is reported as ambiguous.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::component::Component;
use crate::config::validate_components;
use crate::domain::{MappingError, Result, TestInfo};
use crate::obs::{emit_match_resolved, emit_ownership_ambiguous};
use crate::resolution::ResolutionStage;
use crate::signals::{DefaultSignals, TestSignals};

/// Ownership of a single test by a single component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestOwnership {
    pub test_name: String,
    pub suite: String,
    pub component: String,
    pub jira_project: String,
    /// The matcher's Jira component, or the component default when unset.
    pub jira_component: String,
    pub capabilities: Vec<String>,
    pub priority: i32,
    pub variants: Vec<String>,
    pub stage: ResolutionStage,
}

/// The full set of components a corpus is mapped against.
pub struct ComponentRegistry {
    components: Vec<Component>,
    signals: Arc<dyn TestSignals>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.components.len())
            .finish()
    }
}

impl ComponentRegistry {
    /// Build a registry from validated components, using the default signals.
    pub fn new(components: Vec<Component>) -> Result<Self> {
        validate_components(&components)?;
        Ok(Self {
            components,
            signals: Arc::new(DefaultSignals),
        })
    }

    /// Replace the name signals used for resolution.
    pub fn with_signals(mut self, signals: Arc<dyn TestSignals>) -> Self {
        self.signals = signals;
        self
    }

    /// Every component's match for `test`, in registration order.
    pub fn find_matches(&self, test: &TestInfo) -> Vec<TestOwnership> {
        self.components
            .iter()
            .filter_map(|component| {
                let resolution = component.resolve_with(test, self.signals.as_ref())?;
                emit_match_resolved(
                    &component.name,
                    &test.name,
                    resolution.stage,
                    resolution.matcher.priority,
                );

                let matcher = resolution.matcher;
                let jira_component = if matcher.jira_component.is_empty() {
                    component.default_jira_component.clone()
                } else {
                    matcher.jira_component
                };
                Some(TestOwnership {
                    test_name: test.name.clone(),
                    suite: test.suite.clone(),
                    component: component.name.clone(),
                    jira_project: component.jira_project().to_string(),
                    jira_component,
                    capabilities: matcher.capabilities,
                    priority: matcher.priority,
                    variants: component.identify_variants().to_vec(),
                    stage: resolution.stage,
                })
            })
            .collect()
    }

    /// The single owner of `test`, if any.
    ///
    /// Returns [`MappingError::AmbiguousOwnership`] when more than one
    /// component matches at the highest priority.
    pub fn identify(&self, test: &TestInfo) -> Result<Option<TestOwnership>> {
        let matches = self.find_matches(test);
        let Some(top) = matches.iter().map(|m| m.priority).max() else {
            return Ok(None);
        };

        let mut winners: Vec<TestOwnership> =
            matches.into_iter().filter(|m| m.priority == top).collect();
        if winners.len() > 1 {
            let components: Vec<String> = winners.iter().map(|m| m.component.clone()).collect();
            emit_ownership_ambiguous(&test.name, &components);
            return Err(MappingError::AmbiguousOwnership {
                test: test.name.clone(),
                components,
            });
        }
        Ok(winners.pop())
    }

    /// Follow test renames back to the oldest known name.
    pub fn oldest_name(&self, test_name: &str) -> String {
        let mut current = test_name.to_string();
        let mut visited = HashSet::new();

        while visited.insert(current.clone()) {
            let older = self
                .components
                .iter()
                .find_map(|c| c.test_renames.get(&current));
            match older {
                Some(older) => current = older.clone(),
                None => break,
            }
        }
        current
    }

    /// Component name -> sorted, de-duplicated namespaces.
    pub fn list_namespaces(&self) -> BTreeMap<String, Vec<String>> {
        self.components
            .iter()
            .map(|c| (c.name.clone(), c.list_namespaces()))
            .collect()
    }

    /// SHA-256 over the canonical JSON of all components, sorted by name.
    pub fn config_digest(&self) -> Result<String> {
        let mut sorted: Vec<&Component> = self.components.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut hasher = Sha256::new();
        for component in sorted {
            hasher.update(serde_json::to_vec(component)?);
            hasher.update(b"\0");
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
