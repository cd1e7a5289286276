use crate::model::{CustomRuleConfig, PermguardConfigV1, RuleConfig};
use crate::presets::{self, DEFAULT_MANIFEST_PATH, DEFAULT_TEMPLATE_PATH};
use anyhow::Context;
use permguard_domain::policy::{EffectiveConfig, FailOn, RulePolicy};
use permguard_domain::{DeclarationRule, Matcher, PlatformVersion, PolicyCatalog};
use permguard_types::{RepoPath, Severity};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub target_version: Option<u32>,
    pub manifest: Option<String>,
    pub template: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PermguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let preset = presets::preset(&profile);
    let mut catalog = preset.catalog;
    let mut rules = preset.rules;

    let target_version = overrides.target_version.or(cfg.target_version).context(
        "target version is not set (pass --target-version or set target_version in permguard.toml)",
    )?;

    let manifest = overrides
        .manifest
        .or(cfg.manifest)
        .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string());
    let template = overrides
        .template
        .or(cfg.template)
        .unwrap_or_else(|| DEFAULT_TEMPLATE_PATH.to_string());

    // Built-in rule overrides.
    for (rule_id, rc) in cfg.rules.iter() {
        let Some(rule) = catalog.get(rule_id).cloned() else {
            anyhow::bail!("unknown rule id in [rules]: {rule_id}");
        };
        catalog.replace(apply_rule_overrides(rule, rc));

        let entry = rules
            .entry(rule_id.clone())
            .or_insert_with(|| RulePolicy::enabled(preset.default_severity));
        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = rc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {rule_id}"))?;
        }
    }

    // Custom rules, appended in declaration order.
    for cr in &cfg.custom_rules {
        validate_custom_rule(cr)?;
        if catalog.contains(&cr.id) {
            anyhow::bail!("duplicate rule id: {}", cr.id);
        }
        let severity = match cr.severity.as_deref() {
            Some(sev) => parse_severity(sev)
                .with_context(|| format!("invalid severity for {}", cr.id))?,
            None => preset.default_severity,
        };
        catalog.push(build_custom_rule(cr));
        rules.insert(cr.id.clone(), RulePolicy::enabled(severity));
    }

    catalog.retain(|r| rules.get(r.id()).is_none_or(|p| p.enabled));
    ensure_distinct_rules(&catalog)?;

    let mut fail_on = preset.fail_on;
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        fail_on = parse_fail_on(fail_on_s)?;
    }

    log::debug!(
        "resolved profile {} with {} active rules for target {}",
        preset.profile,
        catalog.len(),
        target_version
    );

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            profile: preset.profile,
            target_version: PlatformVersion::new(target_version),
            fail_on,
            manifest: RepoPath::new(manifest),
            template: RepoPath::new(template),
            catalog,
            rules,
        },
    })
}

fn apply_rule_overrides(mut rule: DeclarationRule, rc: &RuleConfig) -> DeclarationRule {
    if let Some(min) = rc.min_version {
        rule = rule.with_min_version(nonzero_version(min));
    }
    if let Some(max) = rc.max_sdk_version {
        rule = rule.with_max_sdk_version(nonzero_version(max));
    }
    if let Some(description) = &rc.description {
        rule = rule.with_description(description.clone());
    }
    rule
}

fn build_custom_rule(cr: &CustomRuleConfig) -> DeclarationRule {
    let description = cr
        .description
        .clone()
        .unwrap_or_else(|| cr.permission.clone());

    let mut rule = DeclarationRule::uses_permission(&cr.id, &cr.permission, description)
        .with_min_version(cr.min_version.and_then(nonzero_version))
        .with_max_sdk_version(cr.max_sdk_version.and_then(nonzero_version));
    for (name, value) in &cr.attributes {
        rule = rule.with_attribute(name.clone(), value.clone());
    }
    if let Some(needle) = &cr.contains {
        rule = rule.with_matcher(Matcher::Substring(needle.clone()));
    }
    rule
}

fn validate_custom_rule(cr: &CustomRuleConfig) -> anyhow::Result<()> {
    if cr.id.trim().is_empty() {
        anyhow::bail!("custom rule id must not be empty");
    }
    if cr.permission.trim().is_empty() {
        anyhow::bail!("custom rule {} has an empty permission", cr.id);
    }
    if has_markup(&cr.permission) {
        anyhow::bail!("custom rule {} permission must not contain '\"', '<' or '>'", cr.id);
    }
    for (name, value) in &cr.attributes {
        if name.trim().is_empty() || name.contains(char::is_whitespace) || has_markup(name) {
            anyhow::bail!("custom rule {} has an invalid attribute name: {name:?}", cr.id);
        }
        if has_markup(value) {
            anyhow::bail!(
                "custom rule {} attribute {name} must not contain '\"', '<' or '>'",
                cr.id
            );
        }
    }
    if cr.contains.as_deref().is_some_and(str::is_empty) {
        anyhow::bail!("custom rule {} has an empty `contains` pattern", cr.id);
    }
    Ok(())
}

fn has_markup(s: &str) -> bool {
    s.contains(['"', '<', '>'])
}

/// Each rule must be the only one that recognizes its own declaration.
fn ensure_distinct_rules(catalog: &PolicyCatalog) -> anyhow::Result<()> {
    let rules = catalog.rules();
    for (i, a) in rules.iter().enumerate() {
        if let Some(b) = rules[..i].iter().find(|b| b.permission() == a.permission()) {
            anyhow::bail!(
                "rules {} and {} both declare {}",
                b.id(),
                a.id(),
                a.permission()
            );
        }
    }
    for a in rules {
        for b in rules.iter().filter(|b| b.id() != a.id()) {
            if a.is_declared_in(b.canonical_line()) {
                anyhow::bail!(
                    "rule {} also matches the declaration of rule {}",
                    a.id(),
                    b.id()
                );
            }
        }
    }
    Ok(())
}

fn nonzero_version(v: u32) -> Option<PlatformVersion> {
    (v != 0).then(|| PlatformVersion::new(v))
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
