//! Component matchers: boolean rules evaluated against a [`TestInfo`].
//!
//! The predicate fields (`sig`, `suite`, `include_all`, `include_any`) are
//! ANDed together, and an empty field never disqualifies a test. The
//! exclusion lists veto a match independently of the inclusion checks.
//! Use separate matchers for an OR.

use serde::{Deserialize, Serialize};

use crate::domain::TestInfo;
use crate::signals::TestSignals;

/// A single ownership rule plus the metadata attached when it matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentMatcher {
    /// SIG label the test must carry (e.g. `sig-network`).
    pub sig: String,

    /// Exact suite the test must belong to.
    pub suite: String,

    /// Substrings that must all appear in the test name.
    pub include_all: Vec<String>,

    /// Substrings of which at least one must appear in the test name.
    pub include_any: Vec<String>,

    /// The matcher is vetoed when all of these appear in the test name.
    pub exclude_all: Vec<String>,

    /// The matcher is vetoed when any of these appears in the test name.
    pub exclude_any: Vec<String>,

    /// Jira component assigned on a match.
    pub jira_component: String,

    /// Capabilities assigned on a match.
    pub capabilities: Vec<String>,

    /// Priority used by callers to arbitrate between components.
    pub priority: i32,
}

impl ComponentMatcher {
    /// A matcher that carries only attribution metadata. Used for the
    /// tag, operator, and namespace fast paths.
    pub fn attribution(jira_component: impl Into<String>) -> Self {
        Self {
            jira_component: jira_component.into(),
            ..Self::default()
        }
    }

    /// Attach capabilities (builder pattern).
    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Attach a priority (builder pattern).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// True iff the test's suite equals this matcher's suite.
    pub fn matches_suite(&self, test: &TestInfo) -> bool {
        test.suite == self.suite
    }

    /// True iff the test name contains every entry of `all_of`.
    /// Vacuously true for an empty list.
    pub fn matches_all_substrings(all_of: &[String], test: &TestInfo) -> bool {
        all_of.iter().all(|s| test.name.contains(s.as_str()))
    }

    /// True iff the test name contains at least one entry of `any_of`.
    /// Vacuously false for an empty list.
    pub fn matches_any_substring(any_of: &[String], test: &TestInfo) -> bool {
        any_of.iter().any(|s| test.name.contains(s.as_str()))
    }

    /// Whether an exclusion list vetoes this matcher for `test`.
    pub fn is_excluded(&self, test: &TestInfo) -> bool {
        if !self.exclude_all.is_empty() && Self::matches_all_substrings(&self.exclude_all, test) {
            return true;
        }
        !self.exclude_any.is_empty() && Self::matches_any_substring(&self.exclude_any, test)
    }

    /// Whether every configured inclusion predicate holds for `test`.
    pub fn is_included(&self, test: &TestInfo, signals: &dyn TestSignals) -> bool {
        let sig_match = self.sig.is_empty() || signals.is_sig_test(&test.name, &self.sig);
        let suite_match = self.suite.is_empty() || self.matches_suite(test);
        let include_all_match =
            self.include_all.is_empty() || Self::matches_all_substrings(&self.include_all, test);
        let include_any_match =
            self.include_any.is_empty() || Self::matches_any_substring(&self.include_any, test);

        sig_match && suite_match && include_all_match && include_any_match
    }

    /// Full rule evaluation: not vetoed and all inclusions hold.
    pub fn matches(&self, test: &TestInfo, signals: &dyn TestSignals) -> bool {
        !self.is_excluded(test) && self.is_included(test, signals)
    }

    /// A matcher with no predicates at all matches every test.
    pub fn is_catch_all(&self) -> bool {
        self.sig.is_empty()
            && self.suite.is_empty()
            && self.include_all.is_empty()
            && self.include_any.is_empty()
            && self.exclude_all.is_empty()
            && self.exclude_any.is_empty()
    }
}
