use crate::catalog::PolicyCatalog;
use crate::model::{ManifestDocument, PlatformVersion};
use crate::policy::{EffectiveConfig, FailOn, RulePolicy};
use permguard_types::{RepoPath, Severity};
use std::collections::BTreeMap;

pub const LEGACY_BLUETOOTH_LINE: &str =
    r#"<uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />"#;

/// Wrap declaration lines in a minimal manifest element.
pub fn manifest_with(lines: &[&str]) -> ManifestDocument {
    let mut text = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<manifest xmlns:android=\"http://schemas.android.com/apk/res/android\">\n",
    );
    for line in lines {
        text.push_str("    ");
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("</manifest>\n");
    ManifestDocument::present(text)
}

/// A manifest declaring every canonical line of the built-in catalog.
pub fn full_manifest() -> ManifestDocument {
    let catalog = PolicyCatalog::bluetooth();
    let lines: Vec<&str> = catalog.rules().iter().map(|r| r.canonical_line()).collect();
    manifest_with(&lines)
}

pub fn config(target: PlatformVersion) -> EffectiveConfig {
    config_with_severity(target, Severity::Error)
}

pub fn config_with_severity(target: PlatformVersion, severity: Severity) -> EffectiveConfig {
    let catalog = PolicyCatalog::bluetooth();
    let rules: BTreeMap<String, RulePolicy> = catalog
        .rules()
        .iter()
        .map(|r| (r.id().to_string(), RulePolicy::enabled(severity)))
        .collect();

    EffectiveConfig {
        profile: "test".to_string(),
        target_version: target,
        fail_on: FailOn::Error,
        manifest: RepoPath::new("Assets/Plugins/Android/AndroidManifest.xml"),
        template: RepoPath::new("templates/AndroidManifest.xml"),
        catalog,
        rules,
    }
}
