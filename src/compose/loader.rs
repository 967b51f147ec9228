//! Descriptor file loading
//!
//! Reading and parsing are strict: an unreadable file surfaces the I/O error
//! and a malformed document surfaces the parse error, each naming the
//! offending path. A malformed descriptor is never treated as an empty one.

use crate::compose::document::ComposeFile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a single descriptor file.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to read descriptor {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ComposeError {
    /// The descriptor file this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ComposeError::Io { path, .. } | ComposeError::Parse { path, .. } => path,
        }
    }
}

/// Reads and parses the descriptor at `path` into the typed model.
///
/// An entirely empty document parses as a descriptor with no services.
pub fn load_compose_file(path: &Path) -> Result<ComposeFile, ComposeError> {
    let raw = fs::read_to_string(path).map_err(|source| ComposeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // An empty file deserializes as YAML null; map it to the empty document.
    serde_yaml::from_str::<Option<ComposeFile>>(&raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| ComposeError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
