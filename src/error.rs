use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by the load-order engine.
///
/// Everything except [`ModOrderError::DirectoryNotFound`] and a missing section on
/// initial read is a hard failure for the caller. Metadata problems never show up
/// here; the catalog reader falls back to folder names instead.
#[derive(Error, Debug)]
pub enum ModOrderError {
    /// The mod installation root is unset or does not exist.
    #[error("Mod directory not found: {0}")]
    DirectoryNotFound(String),

    /// A reorder referenced an identity that is not in the load order, or named one twice.
    #[error("Unknown or duplicate mod identity: {0}")]
    UnknownIdentity(String),

    /// A 1-based position outside `1..=len`.
    #[error("Invalid position {position} (valid range is 1-{len})")]
    InvalidPosition { position: usize, len: usize },

    /// The marker line is missing from the game settings file.
    #[error("Section {marker} not found in {path}")]
    SectionNotFound { marker: String, path: Utf8PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModOrderError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModOrderError>;
