//! Namespace extraction from test names.
//!
//! Two forms are recognised, short first: `ns/<token>` and
//! `namespace/<token>`, where `<token>` is a run of ASCII word characters
//! and hyphens.

use regex::Regex;
use std::sync::LazyLock;

static NAMESPACE_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ns/(?P<namespace>[-A-Za-z0-9_]+)").expect("Invalid regex pattern for ns/")
});

static NAMESPACE_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"namespace/(?P<namespace>[-A-Za-z0-9_]+)")
        .expect("Invalid regex pattern for namespace/")
});

fn capture_namespace<'a>(pattern: &Regex, test_name: &'a str) -> Option<&'a str> {
    pattern
        .captures(test_name)
        .and_then(|caps| caps.name("namespace"))
        .map(|m| m.as_str())
}

/// Extract the namespace a test name refers to, if any.
///
/// The short form wins when both are present.
pub fn extract_namespace(test_name: &str) -> Option<&str> {
    capture_namespace(&NAMESPACE_SHORT, test_name)
        .or_else(|| capture_namespace(&NAMESPACE_FULL, test_name))
}
