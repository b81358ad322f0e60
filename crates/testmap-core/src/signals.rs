//! Signals embedded in test names: field tags, SIG labels, operator tests.
//!
//! Resolution consumes these through the [`TestSignals`] trait so callers can
//! plug in their own naming conventions. [`DefaultSignals`] implements the
//! conventions used by the CI test corpus:
//!
//! - field tags: `[Jira:"Networking"]`, `[Feature:Foo]`
//! - SIG labels: `[sig-network]`
//! - synthetic operator tests: `operator install dns`,
//!   `clusteroperator/dns should not change condition/Available`, ...

/// Capability reported for `operator install <op>` tests.
pub const CAPABILITY_OPERATOR_INSTALL: &str = "Operator Install";
/// Capability reported for `Operator upgrade <op>` tests.
pub const CAPABILITY_OPERATOR_UPGRADE: &str = "Operator Upgrade";
/// Capability reported for `operator conditions <op>` tests.
pub const CAPABILITY_OPERATOR_CONDITIONS: &str = "Operator Conditions";
/// Capability reported for the `condition/Available` monitor tests.
pub const CAPABILITY_OPERATOR_AVAILABLE: &str = "Operator Available";
/// Capability reported for the `condition/Degraded` monitor tests.
pub const CAPABILITY_OPERATOR_DEGRADED: &str = "Operator Degraded";

/// Name-level signals consumed by resolution.
pub trait TestSignals: Send + Sync {
    /// Every raw value tagged `[<field>:<value>]` in the test name, in order.
    fn extract_test_field(&self, test_name: &str, field: &str) -> Vec<String>;

    /// Whether the test name is labelled with the given SIG.
    fn is_sig_test(&self, test_name: &str, sig: &str) -> bool;

    /// Whether the test name checks the given operator, and which
    /// capabilities it exercises.
    fn identify_operator_test(&self, operator: &str, test_name: &str) -> (bool, Vec<String>);
}

/// The naming conventions of the CI test corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSignals;

impl TestSignals for DefaultSignals {
    fn extract_test_field(&self, test_name: &str, field: &str) -> Vec<String> {
        let opener = format!("[{}:", field);
        let mut values = Vec::new();
        let mut rest = test_name;

        while let Some(start) = rest.find(&opener) {
            let after = &rest[start + opener.len()..];
            let Some(end) = after.find(']') else {
                break;
            };
            values.push(after[..end].to_string());
            rest = &after[end + 1..];
        }

        values
    }

    fn is_sig_test(&self, test_name: &str, sig: &str) -> bool {
        test_name.contains(&format!("[{}]", sig))
    }

    fn identify_operator_test(&self, operator: &str, test_name: &str) -> (bool, Vec<String>) {
        let exact = [
            (format!("operator install {}", operator), CAPABILITY_OPERATOR_INSTALL),
            (format!("Operator upgrade {}", operator), CAPABILITY_OPERATOR_UPGRADE),
            (format!("operator conditions {}", operator), CAPABILITY_OPERATOR_CONDITIONS),
        ];
        for (name, capability) in &exact {
            if test_name == name.as_str() {
                return (true, vec![capability.to_string()]);
            }
        }

        let monitors = [
            ("Available", CAPABILITY_OPERATOR_AVAILABLE),
            ("Degraded", CAPABILITY_OPERATOR_DEGRADED),
        ];
        for (condition, capability) in monitors {
            let needle = format!(
                "clusteroperator/{} should not change condition/{}",
                operator, condition
            );
            if test_name.contains(&needle) {
                return (true, vec![capability.to_string()]);
            }
        }

        (false, Vec::new())
    }
}

/// Strip one layer of quoting from `raw`.
///
/// Accepts `"..."` with backslash escapes, `` `...` `` raw strings, and
/// `'c'` single characters. Returns `None` when `raw` is not validly quoted.
pub fn unquote(raw: &str) -> Option<String> {
    let quote = raw.chars().next().filter(|c| matches!(*c, '"' | '`' | '\''))?;
    if raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];

    match quote {
        '`' => (!inner.contains('`')).then(|| inner.to_string()),
        '"' => unescape(inner, '"'),
        _ => unescape(inner, '\'').filter(|s| s.chars().count() == 1),
    }
}

fn unescape(inner: &str, quote: char) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == quote || c == '\n' {
            return None;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            'x' => hex_char(&mut chars, 2)?,
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            d @ '0'..='7' => octal_char(d, &mut chars)?,
            q if q == quote => q,
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

/// `\NNN`: exactly three octal digits, at most 0o377.
fn octal_char(first: char, chars: &mut std::str::Chars<'_>) -> Option<char> {
    let mut code = first.to_digit(8)?;
    for _ in 0..2 {
        code = code * 8 + chars.next()?.to_digit(8)?;
    }
    if code > 0o377 {
        return None;
    }
    char::from_u32(code)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    char::from_u32(code)
}
