//! Ownership resolution: which rule, if any, attributes a test to a component.
//!
//! Resolution runs a fixed sequence of stages and stops at the first one that
//! produces a match:
//!
//! 1. [`ResolutionStage::JiraTag`]: an embedded `[Jira:...]` tag naming the
//!    component's default Jira component (case-insensitive).
//! 2. [`ResolutionStage::OperatorTest`]: a synthetic test for one of the
//!    component's operators.
//! 3. [`ResolutionStage::Matchers`]: the component's matchers, first match wins.
//! 4. [`ResolutionStage::NamespaceOwnership`]: the test's namespace, when the
//!    component owns it, at [`NAMESPACE_PRIORITY`].
//!
//! Namespace ownership runs last so a matcher can claim a test whose
//! namespace belongs to another component. A test with a namespace owned
//! elsewhere is an explicit non-match.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::component::Component;
use crate::domain::TestInfo;
use crate::matcher::ComponentMatcher;
use crate::namespace::extract_namespace;
use crate::signals::{unquote, TestSignals};

/// Priority assigned to namespace-ownership matches.
pub const NAMESPACE_PRIORITY: i32 = 10;

/// Field name of the embedded Jira component tag.
pub const JIRA_TAG_FIELD: &str = "Jira";

/// A single resolution stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    JiraTag,
    OperatorTest,
    Matchers,
    NamespaceOwnership,
}

impl ResolutionStage {
    /// Stages in precedence order.
    pub const ORDER: [ResolutionStage; 4] = [
        ResolutionStage::JiraTag,
        ResolutionStage::OperatorTest,
        ResolutionStage::Matchers,
        ResolutionStage::NamespaceOwnership,
    ];

    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ResolutionStage::JiraTag => "jira_tag",
            ResolutionStage::OperatorTest => "operator_test",
            ResolutionStage::Matchers => "matchers",
            ResolutionStage::NamespaceOwnership => "namespace_ownership",
        }
    }

    /// Run this stage alone.
    pub fn run(
        &self,
        component: &Component,
        test: &TestInfo,
        signals: &dyn TestSignals,
    ) -> Option<ComponentMatcher> {
        match self {
            ResolutionStage::JiraTag => match_jira_tag(component, test, signals),
            ResolutionStage::OperatorTest => match_operator_test(component, test, signals),
            ResolutionStage::Matchers => match_rules(component, test, signals),
            ResolutionStage::NamespaceOwnership => match_namespace(component, test),
        }
    }
}

impl std::fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A successful resolution: the matched rule and the stage that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub stage: ResolutionStage,
    pub matcher: ComponentMatcher,
}

/// Resolve `test` against `component`. `None` means no match.
pub fn resolve(
    component: &Component,
    test: &TestInfo,
    signals: &dyn TestSignals,
) -> Option<Resolution> {
    for stage in ResolutionStage::ORDER {
        if let Some(matcher) = stage.run(component, test, signals) {
            trace!(
                component = %component.name,
                stage = %stage,
                test = %test.name,
                "test resolved"
            );
            return Some(Resolution { stage, matcher });
        }
    }
    None
}

fn match_jira_tag(
    component: &Component,
    test: &TestInfo,
    signals: &dyn TestSignals,
) -> Option<ComponentMatcher> {
    let wanted = &component.default_jira_component;
    let tagged = signals
        .extract_test_field(&test.name, JIRA_TAG_FIELD)
        .into_iter()
        .any(|raw| equal_fold(&unquote(&raw).unwrap_or(raw), wanted));

    tagged.then(|| ComponentMatcher::attribution(component.default_jira_component.clone()))
}

/// Case-insensitive equality under per-character simple case folding, so
/// `ς`, `σ` and `Σ` all compare equal regardless of position.
fn equal_fold(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    let up = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    let mut lower = up.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => up,
    }
}

fn match_operator_test(
    component: &Component,
    test: &TestInfo,
    signals: &dyn TestSignals,
) -> Option<ComponentMatcher> {
    let (is_operator_test, capabilities) = component.is_operator_test(test, signals);
    is_operator_test.then(|| {
        ComponentMatcher::attribution(component.default_jira_component.clone())
            .with_capabilities(capabilities)
    })
}

fn match_rules(
    component: &Component,
    test: &TestInfo,
    signals: &dyn TestSignals,
) -> Option<ComponentMatcher> {
    component
        .matchers
        .iter()
        .find(|m| m.matches(test, signals))
        .cloned()
}

fn match_namespace(component: &Component, test: &TestInfo) -> Option<ComponentMatcher> {
    let namespace = extract_namespace(&test.name)?;
    if !component.is_in_namespace(namespace) {
        trace!(
            component = %component.name,
            namespace = %namespace,
            "namespace owned elsewhere"
        );
        return None;
    }
    Some(
        ComponentMatcher::attribution(component.default_jira_component.clone())
            .with_priority(NAMESPACE_PRIORITY),
    )
}
