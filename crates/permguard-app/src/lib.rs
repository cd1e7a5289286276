//! Use case orchestration for permguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod init;
mod render;
mod report;
mod rules;

pub use check::{CheckInput, CheckOutput, run_check, runtime_error_report, verdict_exit_code};
pub use explain::{
    ExplainOutput, ExplainedItem, RuleFacts, format_explanation, format_not_found, run_explain,
};
pub use init::{InitOutput, run_init};
pub use render::{fold_state, render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, serialize_report, to_renderable};
pub use rules::{RuleListing, RulesOutput, format_rules, run_rules};
