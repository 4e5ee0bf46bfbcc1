//! Error types for asset compilation and rewriting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the writer and the rewriter.
///
/// A lookup miss is not an error: `write` returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid directive pattern")]
    Pattern(#[from] regex::Error),
}

impl AssetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
