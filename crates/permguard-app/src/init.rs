//! The `init` use case: materialize the template manifest, then re-evaluate.

use anyhow::Context;
use camino::Utf8PathBuf;
use permguard_repo::{ManifestSession, materialize_template};
use permguard_types::PermguardReport;
use time::OffsetDateTime;

use crate::check::{CheckInput, assess_session, manifest_path, resolve};

/// Output from the init use case.
#[derive(Clone, Debug)]
pub struct InitOutput {
    /// Where the template was written.
    pub manifest: Utf8PathBuf,
    pub bytes_written: u64,
    /// Evaluation of the freshly written manifest.
    pub report: PermguardReport,
}

/// Copy the configured template to the manifest path if no manifest exists yet.
///
/// An existing manifest is left untouched and surfaces as a
/// [`permguard_repo::RemediationError`] in the error chain.
pub fn run_init(input: CheckInput<'_>) -> anyhow::Result<InitOutput> {
    let resolved = resolve(input.config_text, input.overrides)?;
    let manifest = manifest_path(input.project_root, &resolved);
    let template = input
        .project_root
        .join(resolved.effective.template.as_str());

    let started_at = OffsetDateTime::now_utc();
    // A snapshot read failure (e.g. a directory at the destination) waits until the copy has
    // reported what is in the way.
    let snapshot = ManifestSession::open(manifest.clone());
    let bytes_written = materialize_template(&template, &manifest)?;

    let mut session = snapshot.context("load manifest")?;
    session.reload().context("reload manifest")?;
    let report = assess_session(&session, &resolved, started_at);

    Ok(InitOutput {
        manifest: session.path().to_owned(),
        bytes_written,
        report,
    })
}
