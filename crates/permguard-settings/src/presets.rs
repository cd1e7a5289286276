use permguard_domain::PolicyCatalog;
use permguard_domain::policy::{FailOn, RulePolicy};
use permguard_types::Severity;
use std::collections::BTreeMap;

/// Where Unity projects keep the Android manifest override.
pub const DEFAULT_MANIFEST_PATH: &str = "Assets/Plugins/Android/AndroidManifest.xml";

/// The template shipped inside the Bluetooth LE package.
pub const DEFAULT_TEMPLATE_PATH: &str =
    "Packages/com.velorexe.androidbluetoothlowenergy/Plugins/Android/AndroidManifest.xml";

/// A profile preset, before the target version is known.
#[derive(Clone, Debug)]
pub struct Preset {
    pub profile: String,
    pub fail_on: FailOn,
    pub default_severity: Severity,
    pub catalog: PolicyCatalog,
    pub rules: BTreeMap<String, RulePolicy>,
}

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into project config.
pub fn preset(profile: &str) -> Preset {
    match profile {
        "warn" => build("warn", Severity::Warning),
        // default
        _ => build("strict", Severity::Error),
    }
}

fn build(profile: &str, default_severity: Severity) -> Preset {
    let catalog = PolicyCatalog::bluetooth();
    let rules = catalog
        .rules()
        .iter()
        .map(|r| (r.id().to_string(), RulePolicy::enabled(default_severity)))
        .collect();

    Preset {
        profile: profile.to_string(),
        fail_on: FailOn::Error,
        default_severity,
        catalog,
        rules,
    }
}
