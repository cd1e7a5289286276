//! Pure permission policy evaluation (no IO).
//!
//! Input: a policy catalog, a manifest document loaded elsewhere, and a target platform version.
//! Output: an ordered compliance report, then findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;

pub use catalog::{DeclarationRule, PolicyCatalog};
pub use engine::{assess, evaluate};
pub use matcher::Matcher;
pub use model::{ManifestDocument, PlatformVersion};
