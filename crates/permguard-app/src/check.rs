//! The `check` use case: evaluate the manifest and produce a receipt.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use permguard_domain::report::DomainReport;
use permguard_repo::ManifestSession;
use permguard_settings::{Overrides, PermguardConfigV1, ResolvedConfig};
use permguard_types::{
    Finding, PermguardData, PermguardReport, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, Severity,
    ToolMeta, Verdict, VerdictCounts, VerdictStatus, ids,
};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Project root; manifest and template paths resolve against it.
    pub project_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated receipt.
    pub report: PermguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load the manifest, evaluate, produce a receipt.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve(input.config_text, input.overrides.clone())?;
    let manifest_path = manifest_path(input.project_root, &resolved);
    let session = ManifestSession::open(manifest_path).context("load manifest")?;

    let report = assess_session(&session, &resolved, started_at);
    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        PermguardConfigV1::default()
    } else {
        permguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved = permguard_settings::resolve_config(cfg, overrides).context("resolve config")?;
    log::debug!(
        "target version {} (profile {}, manifest {})",
        resolved.effective.target_version,
        resolved.effective.profile,
        resolved.effective.manifest
    );
    Ok(resolved)
}

pub(crate) fn manifest_path(root: &Utf8Path, resolved: &ResolvedConfig) -> Utf8PathBuf {
    root.join(resolved.effective.manifest.as_str())
}

pub(crate) fn assess_session(
    session: &ManifestSession,
    resolved: &ResolvedConfig,
    started_at: OffsetDateTime,
) -> PermguardReport {
    let effective = &resolved.effective;
    let evaluation = permguard_domain::evaluate(
        &effective.catalog,
        session.document(),
        effective.target_version,
    );
    let domain = permguard_domain::assess(&evaluation, effective);
    envelope(domain, started_at)
}

fn envelope(domain: DomainReport, started_at: OffsetDateTime) -> PermguardReport {
    let DomainReport {
        verdict,
        reasons,
        findings,
        data,
        counts,
    } = domain;

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at,
            ended_at: Some(finished_at),
            duration_ms: Some(duration_ms),
        },
        verdict: Verdict {
            status: verdict,
            counts: VerdictCounts {
                info: counts.info,
                warn: counts.warning,
                error: counts.error,
            },
            reasons,
        },
        findings,
        data,
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "permguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// A receipt describing a run that could not complete.
///
/// Written in place of the normal receipt so that CI always has an artifact to read.
pub fn runtime_error_report(message: &str) -> PermguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: VerdictCounts {
                error: 1,
                ..VerdictCounts::default()
            },
            reasons: vec![ids::CODE_RUNTIME_ERROR.to_string()],
        },
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: None,
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: PermguardData::default(),
    }
}

/// Map verdict to exit code: 0 = pass/warn/skip, 2 = fail.
pub fn verdict_exit_code(verdict: VerdictStatus) -> i32 {
    match verdict {
        VerdictStatus::Pass | VerdictStatus::Warn | VerdictStatus::Skip => 0,
        VerdictStatus::Fail => 2,
    }
}
