use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform API level the evaluation is performed against (e.g. Android API 31).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlatformVersion(u32);

impl PlatformVersion {
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PlatformVersion {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The manifest as seen by one evaluation: either there is no backing file, or its raw text.
///
/// The text is never parsed into a tree; matchers treat it as opaque.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ManifestDocument {
    #[default]
    Absent,
    Present(String),
}

impl ManifestDocument {
    pub fn present(text: impl Into<String>) -> Self {
        Self::Present(text.into())
    }

    pub fn exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Present(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_numerically() {
        assert!(PlatformVersion::new(30) < PlatformVersion::new(31));
        assert!(PlatformVersion::new(100) > PlatformVersion::new(31));
        assert_eq!(PlatformVersion::from(31), PlatformVersion::new(31));
    }

    #[test]
    fn document_accessors() {
        assert!(!ManifestDocument::Absent.exists());
        assert_eq!(ManifestDocument::Absent.text(), None);

        let doc = ManifestDocument::present("<manifest/>");
        assert!(doc.exists());
        assert_eq!(doc.text(), Some("<manifest/>"));
    }
}
