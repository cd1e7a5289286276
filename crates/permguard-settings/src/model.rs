use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_CONFIG_V1: &str = "permguard.config.v1";

/// `permguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PermguardConfigV1 {
    /// Optional schema string for tooling (`permguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `warn`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Platform API level to evaluate against. Required here or on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<u32>,

    /// Manifest path, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Template manifest path, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// When to fail the check: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Map of built-in rule id -> overrides.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// Extra rules appended after the built-in catalog, in declaration order.
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Replace the applicability gate. `0` makes the rule apply to every target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<u32>,

    /// Replace the `android:maxSdkVersion` written into the canonical line. `0` removes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sdk_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomRuleConfig {
    /// Dotted id, unique across built-in and custom rules.
    pub id: String,

    /// Full permission name, e.g. `android.permission.ACCESS_FINE_LOCATION`.
    pub permission: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sdk_version: Option<u32>,

    /// Extra attributes for the canonical line, written in key order.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Match this substring instead of the `android:name` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}
