//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CustomRuleConfig, PermguardConfigV1, RuleConfig, SCHEMA_CONFIG_V1};
pub use presets::{DEFAULT_MANIFEST_PATH, DEFAULT_TEMPLATE_PATH};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `permguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PermguardConfigV1> {
    let cfg: PermguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + rule config).
pub fn resolve_config(
    cfg: PermguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
