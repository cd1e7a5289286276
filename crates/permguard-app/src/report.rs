use anyhow::Context;
use permguard_render::{
    RenderableFinding, RenderableLocation, RenderableReport, RenderableRule, RenderableSeverity,
    RenderableVerdictStatus,
};
use permguard_types::{Finding, PermguardReport, SCHEMA_REPORT_V1, Severity, VerdictStatus, ids};

pub fn parse_report_json(text: &str) -> anyhow::Result<PermguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse permguard report")
}

pub fn serialize_report(report: &PermguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Project a receipt onto the render model. Only applicable rules become rows.
pub fn to_renderable(report: &PermguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Warn => RenderableVerdictStatus::Warn,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
            VerdictStatus::Skip => RenderableVerdictStatus::Skip,
        },
        target_version: report.data.target_version,
        manifest: report.data.manifest.as_str().to_string(),
        manifest_exists: report.data.manifest_exists,
        rules: report
            .data
            .rules
            .iter()
            .filter(|r| r.applicable)
            .map(|r| RenderableRule {
                id: r.id.clone(),
                description: r.description.clone(),
                canonical_line: r.canonical_line.clone(),
                present: r.present,
            })
            .collect(),
        findings: report.findings.iter().map(renderable_finding).collect(),
        help_url: Some(ids::URL_BLUETOOTH_PERMISSIONS.to_string()),
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
        url: f.url.clone(),
    }
}
