//! Compilation environment interfaces.
//!
//! The manager never compiles anything itself. It talks to an [`Environment`]
//! that resolves logical names into [`Artifact`]s, and asks those artifacts
//! to persist themselves.
//!
//! | Module   | Purpose                                             |
//! |----------|-----------------------------------------------------|
//! | `fs`     | Filesystem-backed environment with search paths     |
//! | `minify` | JS/CSS compressors used by the filesystem backend   |

pub mod fs;
pub mod minify;

#[cfg(test)]
pub(crate) mod mock;

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::AssetError;
use crate::options::OptionValue;

pub use fs::{FileAsset, FsEnvironment};
pub use minify::Compressor;

/// Flags passed to [`Artifact::write_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteFlags {
    /// Write a gzip encoding of the content instead of the raw text.
    pub compress: bool,
}

impl WriteFlags {
    pub const fn plain() -> Self {
        Self { compress: false }
    }

    pub const fn compressed() -> Self {
        Self { compress: true }
    }
}

/// A compiled asset as returned by an environment lookup.
pub trait Artifact {
    /// Logical path including the final extension (e.g. `app.js`).
    fn logical_path(&self) -> &str;

    /// Compiled text content.
    fn to_text(&self) -> Cow<'_, str>;

    /// Persist the compiled content to `path`.
    fn write_to(&self, path: &Path, flags: WriteFlags) -> Result<(), AssetError> {
        persist(path, self.to_text().as_bytes(), flags.compress)
    }
}

/// A typed setter for one recognized option.
pub struct OptionSetter<E: ?Sized> {
    pub key: &'static str,
    pub apply: fn(&mut E, &OptionValue),
}

/// The compilation engine sitting behind the manager.
///
/// Setter tables are `'static`, so the environment type must be too.
pub trait Environment: 'static {
    type Asset: Artifact;

    /// Setters for every option this environment recognizes.
    ///
    /// Keys outside this table are never forwarded.
    fn option_setters() -> &'static [OptionSetter<Self>]
    where
        Self: Sized;

    /// Register a search path. Later paths have lower priority.
    fn append_path(&mut self, path: &str);

    /// Resolve a logical name. `Ok(None)` is a plain miss.
    fn find_asset(&mut self, logical_name: &str) -> Result<Option<Self::Asset>, AssetError>;
}

/// Write `bytes` to `path`, gzip-encoded when `compress` is set.
///
/// Parent directories are created as needed.
pub fn persist(path: &Path, bytes: &[u8], compress: bool) -> Result<(), AssetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }

    if !compress {
        return std::fs::write(path, bytes).map_err(|e| AssetError::io(path, e));
    }

    let file = File::create(path).map_err(|e| AssetError::io(path, e))?;
    let mut encoder = GzEncoder::new(file, Compression::best());
    encoder
        .write_all(bytes)
        .map_err(|e| AssetError::io(path, e))?;
    encoder.finish().map_err(|e| AssetError::io(path, e))?;
    Ok(())
}
