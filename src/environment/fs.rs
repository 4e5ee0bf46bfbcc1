//! Filesystem-backed compilation environment.
//!
//! Logical names resolve against registered search paths in order:
//!
//! ```text
//! paths = ["app/assets", "vendor/assets"]
//!
//! "app"              → app/assets/app.js        (first extension that exists)
//! "vendor/modernizr" → vendor/assets/vendor/modernizr.js
//! "theme.css"        → app/assets/theme.css     (explicit extension)
//! ```
//!
//! Content is compressed according to `js_compressor` / `css_compressor`,
//! except for files already named `*.min.js` / `*.min.css`.
//!
//! Absolute names and names with `..` never resolve: a lookup cannot leave
//! the search paths.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use super::{Artifact, Compressor, Environment, OptionSetter};
use crate::error::AssetError;
use crate::options::OptionValue;
use crate::utils::path::split_extension;
use crate::{debug, log};

/// Extensions tried for names given without one.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".css"];

#[derive(Debug, Clone)]
pub struct FsEnvironment {
    paths: Vec<PathBuf>,
    js_compressor: Compressor,
    css_compressor: Compressor,
    extensions: Vec<String>,
}

impl Default for FsEnvironment {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            js_compressor: Compressor::None,
            css_compressor: Compressor::None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FsEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn js_compressor(&self) -> Compressor {
        self.js_compressor
    }

    pub fn css_compressor(&self) -> Compressor {
        self.css_compressor
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Candidate logical paths for a name, in lookup order.
    fn candidates(&self, logical_name: &str) -> Vec<String> {
        if split_extension(logical_name).1.is_empty() {
            self.extensions
                .iter()
                .map(|ext| format!("{logical_name}{ext}"))
                .collect()
        } else {
            vec![logical_name.to_string()]
        }
    }

    fn compressor_for(&self, logical_path: &str) -> Compressor {
        let (stem, ext) = split_extension(logical_path);
        if stem.ends_with(".min") {
            return Compressor::None;
        }
        match ext {
            ".js" | ".mjs" => self.js_compressor,
            ".css" => self.css_compressor,
            _ => Compressor::None,
        }
    }

    fn set_compressor(slot: &mut Compressor, key: &str, value: &OptionValue) {
        match value.as_str().and_then(Compressor::from_name) {
            Some(compressor) => *slot = compressor,
            None => log!("warning"; "ignoring invalid `{}` value: {}", key, value),
        }
    }
}

fn set_js_compressor(env: &mut FsEnvironment, value: &OptionValue) {
    FsEnvironment::set_compressor(&mut env.js_compressor, "js_compressor", value);
}

fn set_css_compressor(env: &mut FsEnvironment, value: &OptionValue) {
    FsEnvironment::set_compressor(&mut env.css_compressor, "css_compressor", value);
}

fn set_extensions(env: &mut FsEnvironment, value: &OptionValue) {
    let extensions: Option<Vec<String>> = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(normalize_extension))
            .collect()
    });
    match extensions {
        Some(extensions) => env.extensions = extensions,
        None => log!("warning"; "ignoring invalid `extensions` value: {}", value),
    }
}

/// Whether `name` stays below whatever root it is joined to.
fn is_confined(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// `"js"` and `".js"` both mean `.js`.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

static SETTERS: &[OptionSetter<FsEnvironment>] = &[
    OptionSetter {
        key: "js_compressor",
        apply: set_js_compressor,
    },
    OptionSetter {
        key: "css_compressor",
        apply: set_css_compressor,
    },
    OptionSetter {
        key: "extensions",
        apply: set_extensions,
    },
];

impl Environment for FsEnvironment {
    type Asset = FileAsset;

    fn option_setters() -> &'static [OptionSetter<Self>] {
        SETTERS
    }

    fn append_path(&mut self, path: &str) {
        self.paths.push(PathBuf::from(path));
    }

    fn find_asset(&mut self, logical_name: &str) -> Result<Option<FileAsset>, AssetError> {
        if !is_confined(logical_name) {
            log!("warning"; "refusing asset name outside the search paths: {}", logical_name);
            return Ok(None);
        }

        let candidates = self.candidates(logical_name);

        for root in &self.paths {
            for candidate in &candidates {
                let source = root.join(candidate);
                if !source.is_file() {
                    continue;
                }

                let raw = std::fs::read_to_string(&source)
                    .map_err(|e| AssetError::io(&source, e))?;
                let compressor = self.compressor_for(candidate);
                debug!(
                    "compile";
                    "{} -> {} ({})",
                    logical_name,
                    source.display(),
                    compressor.name()
                );

                return Ok(Some(FileAsset {
                    logical_path: candidate.clone(),
                    source,
                    content: compressor.apply(raw),
                }));
            }
        }

        Ok(None)
    }
}

/// A compiled file read from one of the search paths.
#[derive(Debug, Clone)]
pub struct FileAsset {
    logical_path: String,
    source: PathBuf,
    content: String,
}

impl FileAsset {
    /// Where the asset was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Artifact for FileAsset {
    fn logical_path(&self) -> &str {
        &self.logical_path
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.content)
    }
}
