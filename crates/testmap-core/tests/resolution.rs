//! Resolution precedence and matcher semantics against whole components.

use testmap_core::{
    resolve, Component, ComponentMatcher, ResolutionStage, TestInfo, TestSignals,
    NAMESPACE_PRIORITY,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn networking() -> Component {
    Component::new("Networking", "OCPBUGS", "Networking")
        .with_operator("network")
        .with_namespace("openshift-sdn")
        .with_matcher(ComponentMatcher {
            sig: "sig-network".to_string(),
            exclude_any: strings(&["[sig-network-edge]"]),
            jira_component: "Networking / ovn-kubernetes".to_string(),
            capabilities: strings(&["Pod Networking"]),
            priority: 2,
            ..Default::default()
        })
}

// ── Determinism ─────────────────────────────────────────────────────────

#[test]
fn resolve_is_deterministic() {
    let component = networking();
    let test = TestInfo::new("[sig-network] pods should talk ns/openshift-sdn", "e2e");
    let first = component.find_match(&test);
    for _ in 0..10 {
        assert_eq!(component.find_match(&test), first);
    }
    assert!(first.is_some());
}

// ── Stage precedence ────────────────────────────────────────────────────

#[test]
fn jira_tag_preempts_every_later_stage() {
    let component = Component::new("Networking", "OCPBUGS", "Networking")
        .with_namespace("openshift-sdn")
        .with_matcher(ComponentMatcher {
            include_all: strings(&["never present"]),
            ..Default::default()
        });
    // The namespace belongs to a different component.
    let test = TestInfo::new(r#"[Jira:"Networking"] ns/openshift-etcd check"#, "");

    let m = component.find_match(&test).expect("tag match");
    assert_eq!(m.jira_component, "Networking");
    assert!(m.capabilities.is_empty());
    assert_eq!(m.priority, 0);
}

#[test]
fn jira_tag_for_another_component_does_not_match() {
    let component = Component::new("Networking", "OCPBUGS", "Networking");
    let test = TestInfo::new(r#"[Jira:"Storage"] volume"#, "");
    assert!(component.find_match(&test).is_none());
}

#[test]
fn operator_test_beats_matchers() {
    let component = networking().with_matcher(ComponentMatcher {
        include_all: strings(&["operator"]),
        jira_component: "should not win".to_string(),
        ..Default::default()
    });
    let test = TestInfo::new("operator install network", "");

    let resolution = component
        .resolve_with(&test, &testmap_core::DefaultSignals)
        .expect("operator match");
    assert_eq!(resolution.stage, ResolutionStage::OperatorTest);
    assert_eq!(resolution.matcher.jira_component, "Networking");
    assert_eq!(
        resolution.matcher.capabilities,
        strings(&["Operator Install"])
    );
}

#[test]
fn matcher_beats_namespace_ownership() {
    let test = TestInfo::new("[sig-network] ns/openshift-sdn pods", "");
    let m = networking().find_match(&test).expect("matcher match");
    assert_eq!(m.jira_component, "Networking / ovn-kubernetes");
    assert_eq!(m.priority, 2);
    assert_eq!(m.capabilities, strings(&["Pod Networking"]));
}

#[test]
fn matcher_can_reclaim_test_from_foreign_namespace() {
    let component = Component::new("Routing", "OCPBUGS", "Routing")
        .with_namespace("openshift-ingress")
        .with_matcher(ComponentMatcher {
            include_all: strings(&["ns/openshift-console", "disruption"]),
            priority: 20,
            ..Default::default()
        });
    let test = TestInfo::new("disruption ns/openshift-console should be available", "");
    let m = component.find_match(&test).expect("reclaimed");
    assert_eq!(m.priority, 20);
}

// ── Matcher evaluation ──────────────────────────────────────────────────

#[test]
fn exclusion_veto_moves_to_next_matcher() {
    let component = Component::new("Foo", "OCPBUGS", "Foo")
        .with_matcher(ComponentMatcher {
            include_all: strings(&["foo"]),
            exclude_any: strings(&["bar"]),
            jira_component: "first".to_string(),
            ..Default::default()
        })
        .with_matcher(ComponentMatcher {
            include_any: strings(&["test"]),
            jira_component: "second".to_string(),
            ..Default::default()
        });

    let m = component
        .find_match(&TestInfo::new("foo bar test", ""))
        .expect("second matcher");
    assert_eq!(m.jira_component, "second");

    let m = component
        .find_match(&TestInfo::new("foo test", ""))
        .expect("first matcher");
    assert_eq!(m.jira_component, "first");
}

#[test]
fn exclude_all_only_vetoes_when_every_substring_present() {
    let component = Component::new("Foo", "OCPBUGS", "Foo").with_matcher(ComponentMatcher {
        include_all: strings(&["foo"]),
        exclude_all: strings(&["bar", "baz"]),
        ..Default::default()
    });
    assert!(component.find_match(&TestInfo::new("foo bar", "")).is_some());
    assert!(component.find_match(&TestInfo::new("foo bar baz", "")).is_none());
}

#[test]
fn first_match_wins() {
    let component = Component::new("Foo", "OCPBUGS", "Foo")
        .with_matcher(ComponentMatcher {
            include_any: strings(&["alpha"]),
            jira_component: "M1".to_string(),
            priority: 1,
            ..Default::default()
        })
        .with_matcher(ComponentMatcher {
            include_any: strings(&["alpha"]),
            jira_component: "M2".to_string(),
            priority: 99,
            ..Default::default()
        });

    let m = component
        .find_match(&TestInfo::new("alpha beta", ""))
        .expect("match");
    assert_eq!(m.jira_component, "M1");
    assert_eq!(m.priority, 1);
}

#[test]
fn suite_and_sig_are_anded() {
    let component = Component::new("Etcd", "OCPBUGS", "Etcd").with_matcher(ComponentMatcher {
        sig: "sig-etcd".to_string(),
        suite: "etcd-suite".to_string(),
        ..Default::default()
    });
    assert!(component
        .find_match(&TestInfo::new("[sig-etcd] leader", "etcd-suite"))
        .is_some());
    assert!(component
        .find_match(&TestInfo::new("[sig-etcd] leader", "other"))
        .is_none());
    assert!(component
        .find_match(&TestInfo::new("leader", "etcd-suite"))
        .is_none());
}

// ── Namespace fallback ──────────────────────────────────────────────────

#[test]
fn namespace_owned_elsewhere_is_a_non_match() {
    let component = Component::new("Storage", "OCPBUGS", "Storage")
        .with_namespace("storage")
        .with_matcher(ComponentMatcher {
            include_all: strings(&["csi"]),
            ..Default::default()
        });
    let test = TestInfo::new("pods in ns/networking are ready", "");
    assert!(component.find_match(&test).is_none());
}

#[test]
fn owned_namespace_matches_at_fallback_priority() {
    let component = Component::new("Storage", "OCPBUGS", "Storage").with_namespace("storage");
    let test = TestInfo::new("pods in namespace/storage are ready", "");

    let m = component.find_match(&test).expect("namespace match");
    assert_eq!(m.jira_component, "Storage");
    assert_eq!(m.priority, NAMESPACE_PRIORITY);
    assert_eq!(m.priority, 10);
}

#[test]
fn no_signals_at_all_is_no_match() {
    assert!(networking()
        .find_match(&TestInfo::new("plain test name", ""))
        .is_none());
    assert!(Component::default()
        .find_match(&TestInfo::new("", ""))
        .is_none());
}

// ── Custom signals ──────────────────────────────────────────────────────

struct PrefixSignals;

impl TestSignals for PrefixSignals {
    fn extract_test_field(&self, _test_name: &str, _field: &str) -> Vec<String> {
        Vec::new()
    }

    fn is_sig_test(&self, test_name: &str, sig: &str) -> bool {
        test_name.starts_with(&format!("{}:", sig))
    }

    fn identify_operator_test(&self, _operator: &str, _test_name: &str) -> (bool, Vec<String>) {
        (false, Vec::new())
    }
}

#[test]
fn custom_signals_drive_sig_matching() {
    let component = Component::new("Net", "OCPBUGS", "Net").with_matcher(ComponentMatcher {
        sig: "network".to_string(),
        ..Default::default()
    });
    let test = TestInfo::new("network: pods talk", "");

    assert!(component.find_match(&test).is_none());
    let resolution = resolve(&component, &test, &PrefixSignals).expect("custom sig match");
    assert_eq!(resolution.stage, ResolutionStage::Matchers);
}
