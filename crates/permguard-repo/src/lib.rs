//! Filesystem adapters: load the manifest document and materialize the template.
//!
//! This crate is the only place that touches the manifest file. Evaluation stays in
//! `permguard-domain`; callers reload the session explicitly after any write.

#![forbid(unsafe_code)]

mod remediate;
mod session;

pub use remediate::{IoFailureReason, RemediationError, materialize_template};
pub use session::{ManifestSession, load_document};
