//! Components: the owning teams or subsystems tests are attributed to.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::TestInfo;
use crate::matcher::ComponentMatcher;
use crate::resolution::{resolve, Resolution};
use crate::signals::{DefaultSignals, TestSignals};

/// An owning entity plus the rules used to claim tests for it.
///
/// Components are built once from configuration and are read-only
/// afterwards, so they can be shared freely across threads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Component {
    /// Human-readable owner identifier.
    pub name: String,

    /// Fallback Jira project for attribution.
    pub default_jira_project: String,

    /// Fallback Jira component for tag, operator, and namespace matches.
    pub default_jira_component: String,

    /// Ordered rules; the first satisfied matcher wins.
    pub matchers: Vec<ComponentMatcher>,

    /// Operators this component is responsible for.
    pub operators: Vec<String>,

    /// Namespaces this component owns.
    pub namespaces: Vec<String>,

    /// Variants this component is scoped to, as `category:value`.
    pub variants: Vec<String>,

    /// Renamed test name -> its oldest known name.
    pub test_renames: BTreeMap<String, String>,
}

impl Component {
    /// Create an empty component with the given name and Jira defaults.
    pub fn new(
        name: impl Into<String>,
        default_jira_project: impl Into<String>,
        default_jira_component: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_jira_project: default_jira_project.into(),
            default_jira_component: default_jira_component.into(),
            ..Self::default()
        }
    }

    /// Append a matcher (builder pattern).
    pub fn with_matcher(mut self, matcher: ComponentMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Append an operator (builder pattern).
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operators.push(operator.into());
        self
    }

    /// Append an owned namespace (builder pattern).
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Resolve `test` against this component using the default signals.
    pub fn find_match(&self, test: &TestInfo) -> Option<ComponentMatcher> {
        self.find_match_with(test, &DefaultSignals)
    }

    /// Resolve `test` against this component with custom signals.
    pub fn find_match_with(
        &self,
        test: &TestInfo,
        signals: &dyn TestSignals,
    ) -> Option<ComponentMatcher> {
        self.resolve_with(test, signals).map(|r| r.matcher)
    }

    /// Like [`Component::find_match_with`], but also reports which stage matched.
    pub fn resolve_with(&self, test: &TestInfo, signals: &dyn TestSignals) -> Option<Resolution> {
        resolve(self, test, signals)
    }

    /// Whether any of this component's operators claims `test`, and the
    /// capabilities the first claiming operator reports.
    pub fn is_operator_test(
        &self,
        test: &TestInfo,
        signals: &dyn TestSignals,
    ) -> (bool, Vec<String>) {
        for operator in &self.operators {
            let (is_operator_test, capabilities) =
                signals.identify_operator_test(operator, &test.name);
            if is_operator_test {
                return (true, capabilities);
            }
        }
        (false, Vec::new())
    }

    /// Owned namespaces, de-duplicated and sorted.
    pub fn list_namespaces(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Exact membership in the owned namespaces.
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// The default Jira project.
    pub fn jira_project(&self) -> &str {
        &self.default_jira_project
    }

    /// Declared variants, verbatim.
    pub fn identify_variants(&self) -> &[String] {
        &self.variants
    }
}
