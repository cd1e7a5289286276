use crate::{ICON_MISSING, ICON_PRESENT, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Permguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Target version: API {}\n- Manifest: `{}`\n\n",
        verdict, report.target_version, report.manifest
    ));

    if !report.manifest_exists {
        out.push_str(&format!("No manifest found at `{}`.\n\n", report.manifest));
        out.push_str("Run `permguard init` to copy the template manifest into place.\n");
        push_help(&mut out, report);
        return out;
    }

    if report.rules.is_empty() {
        out.push_str("No rules apply to this target.\n");
        push_help(&mut out, report);
        return out;
    }

    out.push_str("## Permissions\n\n");
    for rule in &report.rules {
        let icon = if rule.present { ICON_PRESENT } else { ICON_MISSING };
        out.push_str(&format!("- {} {} (`{}`)\n", icon, rule.description, rule.id));
        if !rule.present {
            out.push_str("\n  ```xml\n");
            out.push_str(&format!("  {}\n", rule.canonical_line));
            out.push_str("  ```\n\n");
        }
    }

    push_help(&mut out, report);
    out
}

fn push_help(out: &mut String, report: &RenderableReport) {
    if let Some(url) = &report.help_url {
        out.push_str(&format!("\nMore information: <{}>\n", url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableRule;

    fn rule(id: &str, description: &str, present: bool) -> RenderableRule {
        RenderableRule {
            id: id.to_string(),
            description: description.to_string(),
            canonical_line: format!("<uses-permission android:name=\"{id}\" />"),
            present,
        }
    }

    fn report(rules: Vec<RenderableRule>) -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            target_version: 30,
            manifest: "Assets/Plugins/Android/AndroidManifest.xml".to_string(),
            manifest_exists: true,
            rules,
            findings: Vec::new(),
            help_url: Some("https://example.com/bt".to_string()),
        }
    }

    #[test]
    fn renders_rules_in_order_with_lines_for_missing() {
        let md = render_markdown(&report(vec![
            rule("ble.bluetooth", "Legacy Bluetooth access", true),
            rule("ble.bluetooth_admin", "Legacy Bluetooth Admin access", false),
        ]));

        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("Target version: API 30"));
        let present = md
            .find("✅ Legacy Bluetooth access (`ble.bluetooth`)")
            .expect("present row");
        let missing = md
            .find("❌ Legacy Bluetooth Admin access (`ble.bluetooth_admin`)")
            .expect("missing row");
        assert!(present < missing);
        assert!(md.contains("  <uses-permission android:name=\"ble.bluetooth_admin\" />"));
        assert!(!md.contains("android:name=\"ble.bluetooth\" />"));
        assert!(md.ends_with("More information: <https://example.com/bt>\n"));
    }

    #[test]
    fn renders_missing_manifest() {
        let mut r = report(Vec::new());
        r.manifest_exists = false;
        r.verdict = RenderableVerdictStatus::Skip;
        let md = render_markdown(&r);
        assert!(md.contains("Verdict: **SKIP**"));
        assert!(md.contains("No manifest found at `Assets/Plugins/Android/AndroidManifest.xml`."));
        assert!(md.contains("permguard init"));
        assert!(!md.contains("## Permissions"));
    }

    #[test]
    fn renders_empty_rule_set() {
        let mut r = report(Vec::new());
        r.verdict = RenderableVerdictStatus::Pass;
        r.help_url = None;
        let md = render_markdown(&r);
        assert!(md.ends_with("No rules apply to this target.\n"));
    }
}
