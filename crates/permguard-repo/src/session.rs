use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use permguard_domain::ManifestDocument;
use std::io::ErrorKind;

/// Read the manifest at `path`.
///
/// A missing file is [`ManifestDocument::Absent`], not an error. Invalid UTF-8 is replaced rather
/// than rejected so evaluation always has text to work with.
pub fn load_document(path: &Utf8Path) -> anyhow::Result<ManifestDocument> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(ManifestDocument::Present(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::warn!("manifest not found: {path}");
            Ok(ManifestDocument::Absent)
        }
        Err(err) => Err(err).with_context(|| format!("read manifest {path}")),
    }
}

/// The manifest document owned by one check session.
///
/// The document is a snapshot: it goes stale as soon as the file changes and is only refreshed
/// by [`ManifestSession::reload`].
#[derive(Clone, Debug)]
pub struct ManifestSession {
    path: Utf8PathBuf,
    document: ManifestDocument,
}

impl ManifestSession {
    pub fn open(path: impl Into<Utf8PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let document = load_document(&path)?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn document(&self) -> &ManifestDocument {
        &self.document
    }

    pub fn reload(&mut self) -> anyhow::Result<&ManifestDocument> {
        self.document = load_document(&self.path)?;
        log::debug!(
            "reloaded {} (exists: {})",
            self.path,
            self.document.exists()
        );
        Ok(&self.document)
    }
}
