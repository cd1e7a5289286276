//! The policy catalog: an ordered list of independent declaration rules.

use crate::matcher::Matcher;
use crate::model::PlatformVersion;
use permguard_types::ids;

/// One required `<uses-permission>` declaration.
///
/// Rules are immutable once built: every `with_*` call returns a new rule with its canonical line
/// re-rendered. The applicability gate (`min_version`) and the ceiling attribute written into the
/// canonical line (`max_sdk_version`) are independent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationRule {
    id: String,
    permission: String,
    description: String,
    matcher: Matcher,
    min_version: Option<PlatformVersion>,
    max_sdk_version: Option<PlatformVersion>,
    attributes: Vec<(String, String)>,
    canonical_line: String,
}

impl DeclarationRule {
    /// A rule for `permission`, always applicable, matched by its `android:name` attribute.
    pub fn uses_permission(
        id: impl Into<String>,
        permission: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let permission = permission.into();
        let mut rule = Self {
            id: id.into(),
            matcher: Matcher::uses_permission(&permission),
            permission,
            description: description.into(),
            min_version: None,
            max_sdk_version: None,
            attributes: Vec::new(),
            canonical_line: String::new(),
        };
        rule.render_canonical_line();
        rule
    }

    pub fn with_min_version(mut self, version: Option<PlatformVersion>) -> Self {
        self.min_version = version;
        self
    }

    pub fn with_max_sdk_version(mut self, version: Option<PlatformVersion>) -> Self {
        self.max_sdk_version = version;
        self.render_canonical_line();
        self
    }

    /// Append an extra attribute to the canonical line, after `android:maxSdkVersion`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self.render_canonical_line();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn min_version(&self) -> Option<PlatformVersion> {
        self.min_version
    }

    pub fn max_sdk_version(&self) -> Option<PlatformVersion> {
        self.max_sdk_version
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The exact line to paste into the manifest when the declaration is missing.
    pub fn canonical_line(&self) -> &str {
        &self.canonical_line
    }

    /// Rules without a gate apply to every target.
    pub fn applies_to(&self, target: PlatformVersion) -> bool {
        self.min_version.is_none_or(|min| target >= min)
    }

    pub fn is_declared_in(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    fn render_canonical_line(&mut self) {
        let mut line = format!("<uses-permission android:name=\"{}\"", self.permission);
        if let Some(max) = self.max_sdk_version {
            line.push_str(&format!(" android:maxSdkVersion=\"{max}\""));
        }
        for (name, value) in &self.attributes {
            line.push_str(&format!(" {name}=\"{value}\""));
        }
        line.push_str(" />");
        self.canonical_line = line;
    }
}

/// Ordered rule set. Order is the order a user reviews permissions and is preserved by every
/// evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyCatalog {
    rules: Vec<DeclarationRule>,
}

impl PolicyCatalog {
    pub fn new(rules: Vec<DeclarationRule>) -> Self {
        Self { rules }
    }

    /// The built-in Bluetooth catalog: legacy permissions capped at API 30, then the API 31+
    /// runtime permissions that replace them.
    pub fn bluetooth() -> Self {
        let legacy_ceiling = Some(PlatformVersion::new(30));
        let modern_gate = Some(PlatformVersion::new(31));

        Self::new(vec![
            DeclarationRule::uses_permission(
                ids::RULE_BLE_BLUETOOTH,
                "android.permission.BLUETOOTH",
                "Legacy Bluetooth access ( pre API 31 )",
            )
            .with_max_sdk_version(legacy_ceiling),
            DeclarationRule::uses_permission(
                ids::RULE_BLE_BLUETOOTH_ADMIN,
                "android.permission.BLUETOOTH_ADMIN",
                "Legacy Bluetooth Admin access ( pre API 31 )",
            )
            .with_max_sdk_version(legacy_ceiling),
            DeclarationRule::uses_permission(
                ids::RULE_BLE_BLUETOOTH_SCAN,
                "android.permission.BLUETOOTH_SCAN",
                "Bluetooth Scan ( API 31 and above )",
            )
            .with_attribute("android:usesPermissionFlags", "neverForLocation")
            .with_min_version(modern_gate),
            DeclarationRule::uses_permission(
                ids::RULE_BLE_BLUETOOTH_CONNECT,
                "android.permission.BLUETOOTH_CONNECT",
                "Bluetooth Connect ( API 31 and above )",
            )
            .with_min_version(modern_gate),
        ])
    }

    pub fn rules(&self) -> &[DeclarationRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&DeclarationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the rule with the same id in place, keeping its position.
    pub fn replace(&mut self, rule: DeclarationRule) -> bool {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(slot) => {
                *slot = rule;
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, rule: DeclarationRule) {
        self.rules.push(rule);
    }

    pub fn retain(&mut self, keep: impl FnMut(&DeclarationRule) -> bool) {
        self.rules.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
