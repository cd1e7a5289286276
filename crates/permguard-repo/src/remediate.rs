use camino::Utf8Path;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoFailureReason {
    TemplateUnreadable,
    DestinationExists,
    DestinationUnwritable,
}

impl fmt::Display for IoFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TemplateUnreadable => "template is not readable",
            Self::DestinationExists => "destination already exists",
            Self::DestinationUnwritable => "destination is not writable",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemediationError {
    #[error("{reason}: {path}")]
    IoFailure {
        reason: IoFailureReason,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RemediationError {
    pub fn reason(&self) -> IoFailureReason {
        match self {
            Self::IoFailure { reason, .. } => *reason,
        }
    }
}

fn io_failure(reason: IoFailureReason, path: &Utf8Path, source: std::io::Error) -> RemediationError {
    RemediationError::IoFailure {
        reason,
        path: path.to_string(),
        source,
    }
}

/// Copy `template` to `destination` if, and only if, `destination` does not exist yet.
///
/// Missing parent directories are created. An existing destination is never touched. On success
/// returns the number of bytes written; the caller must reload its manifest session.
pub fn materialize_template(
    template: &Utf8Path,
    destination: &Utf8Path,
) -> Result<u64, RemediationError> {
    let contents = std::fs::read(template)
        .map_err(|source| io_failure(IoFailureReason::TemplateUnreadable, template, source))?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| io_failure(IoFailureReason::DestinationUnwritable, parent, source))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(|source| {
            let reason = if source.kind() == ErrorKind::AlreadyExists {
                IoFailureReason::DestinationExists
            } else {
                IoFailureReason::DestinationUnwritable
            };
            io_failure(reason, destination, source)
        })?;

    if let Err(source) = file.write_all(&contents).and_then(|()| file.sync_all()) {
        drop(file);
        // Only the file created above is removed.
        let _ = std::fs::remove_file(destination);
        return Err(io_failure(
            IoFailureReason::DestinationUnwritable,
            destination,
            source,
        ));
    }

    log::info!("copied template {template} -> {destination}");
    Ok(contents.len() as u64)
}
