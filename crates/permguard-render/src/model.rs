#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub line: Option<u32>,
    pub col: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: Option<String>,
    pub code: String,
    pub message: String,
    pub location: Option<RenderableLocation>,
    pub help: Option<String>,
    pub url: Option<String>,
}

/// One applicable rule, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRule {
    pub id: String,
    pub description: String,
    pub canonical_line: String,
    pub present: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub target_version: u32,
    pub manifest: String,
    pub manifest_exists: bool,
    pub rules: Vec<RenderableRule>,
    pub findings: Vec<RenderableFinding>,
    pub help_url: Option<String>,
}
