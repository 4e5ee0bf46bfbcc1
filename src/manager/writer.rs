//! Content-hashed output files.
//!
//! ```text
//! logical path       fingerprint (SHA1 of compiled text)
//! app.js      ──►    app-6d62afcf8c88d2f842b6c95d33bba6b0a789f941.js
//!
//! directory  path        written to
//! -          -           app-<H>.js
//! /tmp/dir   -           /tmp/dir/app-<H>.js
//! /tmp/dir   path        /tmp/dir/path/app-<H>.js
//! -          path        path/app-<H>.js
//! /tmp/dir   /tmp/path   /tmp/path/app-<H>.js
//! ```
//!
//! `write` returns the hashed file name only; the caller never sees the
//! directory layout.

use std::path::Path;

use super::AssetManager;
use crate::debug;
use crate::environment::{Artifact, Environment, WriteFlags};
use crate::error::AssetError;
use crate::utils::hash::fingerprint;
use crate::utils::path::{is_absolute, join_slash, split_extension};

/// Per-call write options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Output path: absolute, or relative to the manager's directory.
    pub path: Option<String>,
    /// Also write a gzip variant next to the plain file.
    pub gzip: bool,
}

impl WriteOptions {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }
}

/// `<stem>-<fingerprint><extension>` for a logical path.
pub fn digest_name(logical_path: &str, fingerprint: &str) -> String {
    let (stem, extension) = split_extension(logical_path);
    format!("{stem}-{fingerprint}{extension}")
}

/// Directory the output lands in; empty means "relative to cwd".
pub fn target_directory(path: Option<&str>, directory: Option<&str>) -> String {
    match (path.filter(|p| !p.is_empty()), directory) {
        (Some(path), _) if is_absolute(path) => path.to_string(),
        (Some(path), Some(directory)) => join_slash(directory, path),
        (Some(path), None) => path.to_string(),
        (None, Some(directory)) => directory.to_string(),
        (None, None) => String::new(),
    }
}

/// Full output path for `name` inside `target`.
pub fn output_path(target: &str, name: &str) -> String {
    join_slash(target, name)
}

impl<E: Environment> AssetManager<E> {
    /// Compile `logical_name` and write it under its hashed name.
    ///
    /// Returns `Ok(None)` without touching the disk when the asset does not
    /// exist. Write failures propagate as-is; a failed gzip write does not
    /// undo the plain one.
    pub fn write(
        &mut self,
        logical_name: &str,
        options: &WriteOptions,
    ) -> Result<Option<String>, AssetError> {
        let Some(asset) = self.compiled().find_asset(logical_name)? else {
            debug!("compile"; "asset not found: {}", logical_name);
            return Ok(None);
        };

        let digest = fingerprint(asset.to_text().as_bytes());
        let name = digest_name(asset.logical_path(), &digest);

        let target = target_directory(options.path.as_deref(), self.directory());
        let full_path = output_path(&target, &name);

        debug!("compile"; "{} -> {}", logical_name, full_path);
        asset.write_to(Path::new(&full_path), WriteFlags::plain())?;

        if options.gzip {
            let gz_path = format!("{full_path}.gz");
            asset.write_to(Path::new(&gz_path), WriteFlags::compressed())?;
        }

        Ok(Some(name))
    }
}
