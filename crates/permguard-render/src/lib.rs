//! Rendering utilities for CI surfaces and terminals (Markdown, GitHub annotations, text).

#![forbid(unsafe_code)]

mod fold;
mod gha;
mod markdown;
mod model;
mod text;

pub use fold::{FoldDefault, FoldState};
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableFinding, RenderableLocation, RenderableReport, RenderableRule, RenderableSeverity,
    RenderableVerdictStatus,
};
pub use text::render_text;

pub(crate) const ICON_PRESENT: &str = "✅";
pub(crate) const ICON_MISSING: &str = "❌";
