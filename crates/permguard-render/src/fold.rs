use std::collections::BTreeMap;

/// What a rule row shows before the user toggles it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FoldDefault {
    Collapsed,
    Expanded,
    /// Expand only rows whose declaration is missing.
    #[default]
    ExpandMissing,
}

/// Per-rule expanded/collapsed display state, keyed by rule id.
///
/// This is view state. It never lives on the rule itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoldState {
    default: FoldDefault,
    open: BTreeMap<String, bool>,
}

impl FoldState {
    pub fn new(default: FoldDefault) -> Self {
        Self {
            default,
            open: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, rule_id: &str, open: bool) {
        self.open.insert(rule_id.to_string(), open);
    }

    pub fn toggle(&mut self, rule_id: &str, present: bool) {
        let next = !self.is_open(rule_id, present);
        self.set(rule_id, next);
    }

    pub fn is_open(&self, rule_id: &str, present: bool) -> bool {
        match self.open.get(rule_id) {
            Some(open) => *open,
            None => match self.default {
                FoldDefault::Collapsed => false,
                FoldDefault::Expanded => true,
                FoldDefault::ExpandMissing => !present,
            },
        }
    }
}
