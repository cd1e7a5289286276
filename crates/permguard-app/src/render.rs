//! Render use cases: markdown, GitHub annotations and terminal text from in-memory reports.

use permguard_render::{FoldDefault, FoldState, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    permguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    permguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_text(report: &RenderableReport, fold: &FoldState) -> String {
    permguard_render::render_text(report, fold)
}

/// Fold state for the terminal view: `default` everywhere, flipped for each id in `toggled`.
pub fn fold_state(
    report: &RenderableReport,
    default: FoldDefault,
    toggled: &[String],
) -> FoldState {
    let mut fold = FoldState::new(default);
    for id in toggled {
        let present = report
            .rules
            .iter()
            .find(|r| &r.id == id)
            .is_some_and(|r| r.present);
        fold.toggle(id, present);
    }
    fold
}

#[cfg(test)]
mod tests {
    use super::*;
    use permguard_render::{
        RenderableFinding, RenderableLocation, RenderableRule, RenderableSeverity,
        RenderableVerdictStatus,
    };

    fn finding(code: &str) -> RenderableFinding {
        RenderableFinding {
            severity: RenderableSeverity::Error,
            check_id: Some("ble.bluetooth_connect".to_string()),
            code: code.to_string(),
            message: "missing".to_string(),
            location: Some(RenderableLocation {
                path: "AndroidManifest.xml".to_string(),
                line: None,
                col: None,
            }),
            help: None,
            url: None,
        }
    }

    fn sample_report() -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            target_version: 31,
            manifest: "AndroidManifest.xml".to_string(),
            manifest_exists: true,
            rules: vec![
                RenderableRule {
                    id: "ble.bluetooth_scan".to_string(),
                    description: "Bluetooth Scan".to_string(),
                    canonical_line: "<uses-permission scan />".to_string(),
                    present: true,
                },
                RenderableRule {
                    id: "ble.bluetooth_connect".to_string(),
                    description: "Bluetooth Connect".to_string(),
                    canonical_line: "<uses-permission />".to_string(),
                    present: false,
                },
            ],
            findings: vec![finding("a"), finding("b")],
            help_url: None,
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let annotations = render_annotations(&sample_report(), 1);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("❌ Bluetooth Connect"));
    }

    #[test]
    fn render_text_collapsed_hides_lines() {
        let text = render_text(&sample_report(), &FoldState::new(FoldDefault::Collapsed));
        assert!(!text.contains("<uses-permission />"));
    }

    #[test]
    fn toggled_rows_flip_the_default() {
        let report = sample_report();
        let untouched = render_text(&report, &fold_state(&report, FoldDefault::ExpandMissing, &[]));
        assert!(untouched.contains("<uses-permission />"));
        assert!(!untouched.contains("<uses-permission scan />"));

        let toggled = vec![
            "ble.bluetooth_scan".to_string(),
            "ble.bluetooth_connect".to_string(),
        ];
        let text = render_text(
            &report,
            &fold_state(&report, FoldDefault::ExpandMissing, &toggled),
        );
        assert!(text.contains("<uses-permission scan />"));
        assert!(!text.contains("<uses-permission />"));
    }
}
