//! Integration tests for the absent-manifest remediation flow.
//!
//! The session must be reloaded explicitly after the template is copied; evaluation never
//! refreshes state on its own.

use camino::Utf8PathBuf;
use permguard_domain::{ManifestDocument, PlatformVersion, PolicyCatalog, evaluate};
use permguard_repo::{IoFailureReason, ManifestSession, materialize_template};
use std::path::PathBuf;
use tempfile::TempDir;

/// The template shipped at the repo root (`templates/AndroidManifest.xml`).
fn shipped_template() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/permguard-repo -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("permguard-repo should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("templates").join("AndroidManifest.xml"))
        .expect("template path should be valid UTF-8")
}

#[test]
fn template_copy_then_reload_yields_compliant_report() {
    let tmp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    let destination = root.join("Assets/Plugins/Android/AndroidManifest.xml");
    let catalog = PolicyCatalog::bluetooth();

    let mut session = ManifestSession::open(&destination).expect("open session");
    assert!(!evaluate(&catalog, session.document(), PlatformVersion::new(31)).manifest_exists());

    materialize_template(&shipped_template(), &destination).expect("copy template");

    // Stale until reloaded.
    assert_eq!(session.document(), &ManifestDocument::Absent);
    session.reload().expect("reload");

    for target in [30, 31, 34] {
        let evaluation = evaluate(&catalog, session.document(), PlatformVersion::new(target));
        let report = evaluation.report().expect("report after reload");
        assert!(
            report.is_compliant(),
            "shipped template should satisfy the catalog at API {target}"
        );
    }
}

#[test]
fn remediation_is_copy_if_absent() {
    let tmp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    let destination = root.join("AndroidManifest.xml");

    materialize_template(&shipped_template(), &destination).expect("first copy succeeds");
    let first = std::fs::read_to_string(&destination).expect("read");

    let err = materialize_template(&shipped_template(), &destination)
        .expect_err("second copy must fail");
    assert_eq!(err.reason(), IoFailureReason::DestinationExists);
    assert_eq!(std::fs::read_to_string(&destination).expect("read"), first);
}
