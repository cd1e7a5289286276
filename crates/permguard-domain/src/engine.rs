use crate::catalog::PolicyCatalog;
use crate::fingerprint::fingerprint_for_permission;
use crate::model::{ManifestDocument, PlatformVersion};
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{ComplianceReport, DomainReport, Evaluation, RuleStatus, SeverityCounts};
use permguard_types::{
    Finding, Location, PermguardData, RuleRow, Severity, VerdictStatus, ids,
};
use serde_json::json;

/// Evaluate `catalog` against `document` for `target`.
///
/// Total over its inputs: any text produces a report, an absent document produces
/// [`Evaluation::NoManifest`] whatever the target.
pub fn evaluate<'a>(
    catalog: &'a PolicyCatalog,
    document: &ManifestDocument,
    target: PlatformVersion,
) -> Evaluation<'a> {
    let Some(text) = document.text() else {
        log::debug!("no manifest; skipping {} rules", catalog.len());
        return Evaluation::NoManifest;
    };

    let statuses = catalog
        .rules()
        .iter()
        .map(|rule| {
            let applicable = rule.applies_to(target);
            let present = applicable && rule.is_declared_in(text);
            RuleStatus {
                rule,
                applicable,
                present,
            }
        })
        .collect::<Vec<_>>();

    let report = ComplianceReport { target, statuses };
    for status in report.gated() {
        log::debug!("{} does not apply to target {}", status.rule.id(), target);
    }
    Evaluation::Report(report)
}

/// Turn an evaluation into findings, a verdict, and receipt data.
///
/// Findings follow catalog order.
pub fn assess(evaluation: &Evaluation<'_>, cfg: &EffectiveConfig) -> DomainReport {
    let mut data = PermguardData {
        profile: cfg.profile.clone(),
        target_version: cfg.target_version.get(),
        manifest: cfg.manifest.clone(),
        manifest_exists: evaluation.manifest_exists(),
        rules_total: cfg.catalog.len() as u32,
        ..PermguardData::default()
    };

    let Some(report) = evaluation.report() else {
        return DomainReport {
            verdict: VerdictStatus::Skip,
            reasons: vec![ids::REASON_MANIFEST_MISSING.to_string()],
            findings: Vec::new(),
            data,
            counts: SeverityCounts::default(),
        };
    };

    let mut findings = Vec::new();
    for status in report.entries() {
        data.rules.push(RuleRow {
            id: status.rule.id().to_string(),
            description: status.rule.description().to_string(),
            canonical_line: status.rule.canonical_line().to_string(),
            applicable: status.applicable,
            present: status.present,
        });
        if !status.present {
            findings.push(missing_finding(status, cfg));
        }
    }

    data.rules_applicable = data.rules.len() as u32;
    data.rules_present = data.rules.iter().filter(|r| r.present).count() as u32;
    data.rules_missing = data.rules_applicable - data.rules_present;

    let counts = SeverityCounts::from_findings(&findings);
    let verdict = compute_verdict(&findings, cfg.fail_on);

    DomainReport {
        verdict,
        reasons: Vec::new(),
        findings,
        data,
        counts,
    }
}

fn missing_finding(status: &RuleStatus<'_>, cfg: &EffectiveConfig) -> Finding {
    let rule = status.rule;
    Finding {
        severity: cfg.severity_for(rule.id()),
        check_id: rule.id().to_string(),
        code: ids::CODE_MISSING_PERMISSION.to_string(),
        message: format!(
            "manifest does not declare {} ({})",
            rule.permission(),
            rule.description()
        ),
        location: Some(Location {
            path: cfg.manifest.clone(),
            line: None,
            col: None,
        }),
        help: Some(rule.canonical_line().to_string()),
        url: Some(ids::URL_BLUETOOTH_PERMISSIONS.to_string()),
        fingerprint: Some(fingerprint_for_permission(
            rule.id(),
            ids::CODE_MISSING_PERMISSION,
            cfg.manifest.as_str(),
            rule.permission(),
        )),
        data: json!({
            "permission": rule.permission(),
            "min_version": rule.min_version().map(PlatformVersion::get),
            "max_sdk_version": rule.max_sdk_version().map(PlatformVersion::get),
            "target_version": cfg.target_version.get(),
        }),
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> VerdictStatus {
    if findings.iter().any(|f| f.severity == Severity::Error) {
        return VerdictStatus::Fail;
    }

    if findings.iter().any(|f| f.severity == Severity::Warning) {
        return match fail_on {
            FailOn::Warning => VerdictStatus::Fail,
            FailOn::Error => VerdictStatus::Warn,
        };
    }

    VerdictStatus::Pass
}
