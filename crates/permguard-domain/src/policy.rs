use crate::catalog::PolicyCatalog;
use crate::model::PlatformVersion;
use permguard_types::{RepoPath, Severity};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl RulePolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub target_version: PlatformVersion,
    pub fail_on: FailOn,
    /// Project-relative manifest location, used for finding locations and fingerprints.
    pub manifest: RepoPath,
    /// Project-relative template location, consumed by the remediation action.
    pub template: RepoPath,
    /// Enabled rules only, in review order.
    pub catalog: PolicyCatalog,
    pub rules: BTreeMap<String, RulePolicy>,
}

impl EffectiveConfig {
    pub fn rule_policy(&self, rule_id: &str) -> Option<&RulePolicy> {
        self.rules.get(rule_id).filter(|p| p.enabled)
    }

    /// Rules without an explicit policy report missing declarations as errors.
    pub fn severity_for(&self, rule_id: &str) -> Severity {
        self.rule_policy(rule_id)
            .map(|p| p.severity)
            .unwrap_or(Severity::Error)
    }
}
