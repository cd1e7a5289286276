//! The `rules` use case: list the resolved catalog.

use permguard_domain::PlatformVersion;
use permguard_settings::Overrides;
use permguard_types::{Severity, ids};

use crate::check::resolve;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleListing {
    pub id: String,
    pub permission: String,
    pub description: String,
    pub min_version: Option<u32>,
    pub max_sdk_version: Option<u32>,
    pub severity: Severity,
    pub canonical_line: String,
    /// `None` when no target version is configured.
    pub applicable: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct RulesOutput {
    pub target_version: Option<u32>,
    pub rules: Vec<RuleListing>,
}

/// Resolve the config and list every enabled rule in catalog order.
///
/// Unlike `check`, a missing target version is not an error here: rows are listed without
/// applicability.
pub fn run_rules(config_text: &str, mut overrides: Overrides) -> anyhow::Result<RulesOutput> {
    // Parse errors surface from `resolve` below.
    let file_target = permguard_settings::parse_config_toml(config_text)
        .ok()
        .and_then(|cfg| cfg.target_version);
    let target_version = overrides.target_version.or(file_target);
    if target_version.is_none() {
        overrides.target_version = Some(0);
    }

    let resolved = resolve(config_text, overrides)?;
    let effective = &resolved.effective;

    let rules = effective
        .catalog
        .rules()
        .iter()
        .map(|rule| RuleListing {
            id: rule.id().to_string(),
            permission: rule.permission().to_string(),
            description: rule.description().to_string(),
            min_version: rule.min_version().map(PlatformVersion::get),
            max_sdk_version: rule.max_sdk_version().map(PlatformVersion::get),
            severity: effective.severity_for(rule.id()),
            canonical_line: rule.canonical_line().to_string(),
            applicable: target_version.map(|t| rule.applies_to(PlatformVersion::new(t))),
        })
        .collect();

    Ok(RulesOutput {
        target_version,
        rules,
    })
}

pub fn format_rules(output: &RulesOutput) -> String {
    let mut out = String::new();

    match output.target_version {
        Some(target) => out.push_str(&format!("Rules for target API {}:\n\n", target)),
        None => out.push_str("Rules (no target version configured):\n\n"),
    }

    for rule in &output.rules {
        let gate = match rule.min_version {
            Some(min) => format!("API {min} and above"),
            None => "all versions".to_string(),
        };
        let status = match rule.applicable {
            Some(true) => " [applies]",
            Some(false) => " [skipped]",
            None => "",
        };
        out.push_str(&format!("{} ({}){}\n", rule.id, gate, status));
        out.push_str(&format!("  {}\n", rule.description));
        out.push_str(&format!("  severity: {}\n", severity_label(rule.severity)));
        out.push_str(&format!("  {}\n\n", rule.canonical_line));
    }

    out.push_str(&format!(
        "More information on permissions: {}\n",
        ids::URL_BLUETOOTH_PERMISSIONS
    ));
    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_catalog_without_target() {
        let output = run_rules("", Overrides::default()).expect("run_rules");
        assert_eq!(output.target_version, None);
        assert_eq!(output.rules.len(), 4);
        assert!(output.rules.iter().all(|r| r.applicable.is_none()));
        assert_eq!(output.rules[2].min_version, Some(31));
        assert_eq!(output.rules[0].max_sdk_version, Some(30));

        let text = format_rules(&output);
        assert!(text.starts_with("Rules (no target version configured):"));
        assert!(text.contains("ble.bluetooth_scan (API 31 and above)\n"));
        assert!(text.ends_with(&format!("{}\n", ids::URL_BLUETOOTH_PERMISSIONS)));
    }

    #[test]
    fn marks_applicability_for_target() {
        let output = run_rules("target_version = 30", Overrides::default()).expect("run_rules");
        assert_eq!(output.target_version, Some(30));
        let applicable: Vec<Option<bool>> = output.rules.iter().map(|r| r.applicable).collect();
        assert_eq!(
            applicable,
            vec![Some(true), Some(true), Some(false), Some(false)]
        );
        assert!(format_rules(&output).contains("ble.bluetooth (all versions) [applies]"));
    }

    #[test]
    fn includes_custom_rules_and_severity() {
        let output = run_rules(
            r#"
profile = "warn"

[[custom_rules]]
id = "app.camera"
permission = "android.permission.CAMERA"
"#,
            Overrides::default(),
        )
        .expect("run_rules");
        let last = output.rules.last().expect("rules");
        assert_eq!(last.id, "app.camera");
        assert_eq!(last.description, "android.permission.CAMERA");
        assert_eq!(last.severity, Severity::Warning);
    }
}
