use crate::{FoldState, ICON_MISSING, ICON_PRESENT, RenderableReport};

/// Render the interactive-style permission view for a terminal.
///
/// Rows expanded in `fold` show the exact line to paste under the description.
pub fn render_text(report: &RenderableReport, fold: &FoldState) -> String {
    let mut out = String::new();

    if report.manifest_exists {
        out.push_str(&format!("Manifest found: {}\n", report.manifest));
        out.push_str(&format!(
            "Manifest permissions (target API {}):\n",
            report.target_version
        ));
        if report.rules.is_empty() {
            out.push_str("  (no rules apply to this target)\n");
        }
        for rule in &report.rules {
            let icon = if rule.present { ICON_PRESENT } else { ICON_MISSING };
            out.push_str(&format!("  {} {}\n", icon, rule.description));
            if fold.is_open(&rule.id, rule.present) {
                out.push_str(&format!("       {}\n", rule.canonical_line));
            }
        }
    } else {
        out.push_str(&format!("No existing manifest found at {}\n", report.manifest));
        out.push_str("  Run `permguard init` to use the template manifest.\n");
    }

    if let Some(url) = &report.help_url {
        out.push_str(&format!("\nMore information on permissions: {}\n", url));
    }

    out
}
