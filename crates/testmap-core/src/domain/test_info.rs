//! Test descriptor: the identity of a single CI test result.

use serde::{Deserialize, Serialize};

/// A test as seen by the mapping layer: its display name and suite.
///
/// The name is opaque structured text. It may embed tags such as
/// `[sig-network]`, `[Jira:"Networking"]`, or a `ns/<namespace>` reference,
/// which the resolution stages extract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TestInfo {
    /// Full test name.
    pub name: String,

    /// Suite the test ran in (may be empty).
    #[serde(default)]
    pub suite: String,
}

impl TestInfo {
    /// Create a new test descriptor.
    pub fn new(name: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite: suite.into(),
        }
    }
}
