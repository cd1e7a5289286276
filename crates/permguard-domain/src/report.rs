use crate::catalog::DeclarationRule;
use crate::model::PlatformVersion;
use permguard_types::{Finding, PermguardData, Severity, VerdictStatus};

/// Compliance of one catalog rule against one manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleStatus<'a> {
    pub rule: &'a DeclarationRule,
    pub applicable: bool,
    /// Always `false` for rules that do not apply to the target.
    pub present: bool,
}

/// Per-rule results, one per catalog rule, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplianceReport<'a> {
    pub target: PlatformVersion,
    pub statuses: Vec<RuleStatus<'a>>,
}

impl<'a> ComplianceReport<'a> {
    /// Applicable rules only: the list a user reviews.
    pub fn entries(&self) -> impl Iterator<Item = &RuleStatus<'a>> {
        self.statuses.iter().filter(|s| s.applicable)
    }

    /// Rules excluded because the target is below their gate.
    pub fn gated(&self) -> impl Iterator<Item = &RuleStatus<'a>> {
        self.statuses.iter().filter(|s| !s.applicable)
    }

    pub fn missing(&self) -> impl Iterator<Item = &RuleStatus<'a>> {
        self.entries().filter(|s| !s.present)
    }

    pub fn is_compliant(&self) -> bool {
        self.missing().next().is_none()
    }
}

/// Result of evaluating a catalog against a manifest document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation<'a> {
    /// There is nothing to evaluate; materializing a template is the remediation.
    NoManifest,
    Report(ComplianceReport<'a>),
}

impl<'a> Evaluation<'a> {
    pub fn manifest_exists(&self) -> bool {
        matches!(self, Self::Report(_))
    }

    pub fn report(&self) -> Option<&ComplianceReport<'a>> {
        match self {
            Self::NoManifest => None,
            Self::Report(report) => Some(report),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: VerdictStatus,
    pub reasons: Vec<String>,
    pub findings: Vec<Finding>,
    pub data: PermguardData,
    pub counts: SeverityCounts,
}
