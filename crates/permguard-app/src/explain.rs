//! The `explain` use case: rule and code guidance, joined with catalog facts.

use permguard_domain::{DeclarationRule, PlatformVersion, PolicyCatalog};
use permguard_types::explain::{self, Explanation};
use permguard_types::ids;

/// Catalog facts for a built-in rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFacts {
    pub permission: String,
    pub min_version: Option<u32>,
    pub max_sdk_version: Option<u32>,
    pub canonical_line: String,
}

impl RuleFacts {
    fn from_rule(rule: &DeclarationRule) -> Self {
        Self {
            permission: rule.permission().to_string(),
            min_version: rule.min_version().map(PlatformVersion::get),
            max_sdk_version: rule.max_sdk_version().map(PlatformVersion::get),
            canonical_line: rule.canonical_line().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExplainedItem {
    pub identifier: String,
    pub explanation: Explanation,
    /// `None` for codes.
    pub rule: Option<RuleFacts>,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(ExplainedItem),
    NotFound {
        identifier: String,
        available_rule_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up guidance for a rule id or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let Some(explanation) = explain::lookup_explanation(identifier) else {
        return ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rule_ids: explain::all_rule_ids(),
            available_codes: explain::all_codes(),
        };
    };

    let catalog = PolicyCatalog::bluetooth();
    ExplainOutput::Found(ExplainedItem {
        identifier: identifier.to_string(),
        explanation,
        rule: catalog.get(identifier).map(RuleFacts::from_rule),
    })
}

/// Terminal layout: header and catalog facts first, then prose, then the manifest diff.
pub fn format_explanation(item: &ExplainedItem) -> String {
    let exp = &item.explanation;
    let mut out = format!("{}: {}\n", item.identifier, exp.title);

    if let Some(rule) = &item.rule {
        out.push_str(&format!("  permission: {}\n", rule.permission));
        out.push_str(&format!("  applies:    {}\n", applies_label(rule.min_version)));
        if let Some(max) = rule.max_sdk_version {
            out.push_str(&format!("  ceiling:    maxSdkVersion {max}\n"));
        }
        out.push_str("  declare:\n");
        out.push_str(&format!("    {}\n", rule.canonical_line));
    }

    out.push('\n');
    out.push_str(exp.description);
    out.push_str("\n\nHow to fix:\n");
    push_indented(&mut out, exp.remediation);

    out.push_str("\nManifest before:\n");
    push_indented(&mut out, exp.examples.before);
    out.push_str("\nManifest after:\n");
    push_indented(&mut out, exp.examples.after);

    out.push_str(&format!("\nSee {}\n", ids::URL_BLUETOOTH_PERMISSIONS));
    out
}

pub fn format_not_found(identifier: &str, rule_ids: &[&str], codes: &[&str]) -> String {
    format!(
        "Unknown rule id or code: {identifier}\n\nrule ids: {}\ncodes:    {}\n",
        rule_ids.join(", "),
        codes.join(", ")
    )
}

fn applies_label(min_version: Option<u32>) -> String {
    match min_version {
        Some(min) => format!("API {min} and above"),
        None => "all versions".to_string(),
    }
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(identifier: &str) -> ExplainedItem {
        match run_explain(identifier) {
            ExplainOutput::Found(item) => item,
            ExplainOutput::NotFound { .. } => panic!("expected {identifier} to be known"),
        }
    }

    #[test]
    fn rule_ids_carry_catalog_facts() {
        let item = found(ids::RULE_BLE_BLUETOOTH_SCAN);
        let rule = item.rule.expect("rule facts");
        assert_eq!(rule.permission, "android.permission.BLUETOOTH_SCAN");
        assert_eq!(rule.min_version, Some(31));
        assert_eq!(rule.max_sdk_version, None);
        assert_eq!(
            rule.canonical_line,
            r#"<uses-permission android:name="android.permission.BLUETOOTH_SCAN" android:usesPermissionFlags="neverForLocation" />"#
        );
    }

    #[test]
    fn codes_have_no_rule_facts() {
        let item = found(ids::CODE_MISSING_PERMISSION);
        assert!(item.rule.is_none());
        let text = format_explanation(&item);
        assert!(text.starts_with("missing_permission: Missing Permission Declaration\n\n"));
        assert!(!text.contains("declare:"));
    }

    #[test]
    fn explain_unknown() {
        match run_explain("not_a_real_thing") {
            ExplainOutput::NotFound {
                identifier,
                available_rule_ids,
                available_codes,
            } => {
                assert_eq!(identifier, "not_a_real_thing");
                assert_eq!(available_rule_ids.len(), 4);
                assert!(!available_codes.is_empty());
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn legacy_rule_layout_shows_ceiling_and_canonical_line() {
        let text = format_explanation(&found(ids::RULE_BLE_BLUETOOTH));
        let head: Vec<&str> = text.lines().take(5).collect();
        assert_eq!(
            head,
            vec![
                "ble.bluetooth: Legacy Bluetooth Permission",
                "  permission: android.permission.BLUETOOTH",
                "  applies:    all versions",
                "  ceiling:    maxSdkVersion 30",
                "  declare:",
            ]
        );
        assert!(text.contains(
            "    <uses-permission android:name=\"android.permission.BLUETOOTH\" android:maxSdkVersion=\"30\" />\n"
        ));
        assert!(text.contains("\nHow to fix:\n  Add the canonical line"));
        assert!(text.contains("\nManifest after:\n  <manifest"));
        assert!(text.ends_with(&format!("See {}\n", ids::URL_BLUETOOTH_PERMISSIONS)));
    }

    #[test]
    fn modern_rule_has_no_ceiling_line() {
        let text = format_explanation(&found(ids::RULE_BLE_BLUETOOTH_CONNECT));
        assert!(text.contains("  applies:    API 31 and above\n"));
        assert!(!text.contains("ceiling:"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["rule.one", "rule.two"], &["code.one"]);
        assert_eq!(
            formatted,
            "Unknown rule id or code: missing\n\nrule ids: rule.one, rule.two\ncodes:    code.one\n"
        );
    }
}
