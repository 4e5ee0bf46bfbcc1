//! Recording environment for unit tests.

use std::borrow::Cow;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::{Artifact, Environment, OptionSetter, WriteFlags};
use crate::error::AssetError;
use crate::options::OptionValue;

/// One recorded `write_to` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub path: String,
    pub compress: bool,
}

/// Environment backed by an in-memory asset table.
#[derive(Debug, Default)]
pub struct MockEnvironment {
    /// (logical name, logical path, content)
    pub assets: Vec<(String, String, String)>,
    /// Setter keys applied, in call order.
    pub applied: Vec<(String, OptionValue)>,
    /// Paths appended, in call order.
    pub paths: Vec<String>,
    /// Logical names looked up.
    pub lookups: Vec<String>,
    pub writes: Rc<RefCell<Vec<WriteCall>>>,
    /// Fail every write whose path ends with this suffix.
    pub fail_suffix: Option<String>,
}

impl MockEnvironment {
    /// The fixture set: `app`, `vendor/modernizr` and `vendor/tracking`.
    pub fn with_fixtures() -> Self {
        let mut env = Self::default();
        env.add("app", "app.js", "alert('test')");
        env.add("vendor/modernizr", "vendor/modernizr.js", "modernizr()");
        env.add("vendor/tracking", "vendor/tracking.js", "track()");
        env
    }

    pub fn add(&mut self, name: &str, logical_path: &str, content: &str) {
        self.assets
            .push((name.into(), logical_path.into(), content.into()));
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.borrow().clone()
    }

    pub fn applied_keys(&self) -> Vec<&str> {
        self.applied.iter().map(|(k, _)| k.as_str()).collect()
    }
}

fn set_js_compressor(env: &mut MockEnvironment, value: &OptionValue) {
    env.applied.push(("js_compressor".into(), value.clone()));
}

fn set_css_compressor(env: &mut MockEnvironment, value: &OptionValue) {
    env.applied.push(("css_compressor".into(), value.clone()));
}

fn set_debug(env: &mut MockEnvironment, value: &OptionValue) {
    env.applied.push(("debug".into(), value.clone()));
}

static SETTERS: &[OptionSetter<MockEnvironment>] = &[
    OptionSetter {
        key: "js_compressor",
        apply: set_js_compressor,
    },
    OptionSetter {
        key: "css_compressor",
        apply: set_css_compressor,
    },
    OptionSetter {
        key: "debug",
        apply: set_debug,
    },
];

impl Environment for MockEnvironment {
    type Asset = MockAsset;

    fn option_setters() -> &'static [OptionSetter<Self>] {
        SETTERS
    }

    fn append_path(&mut self, path: &str) {
        self.paths.push(path.to_string());
    }

    fn find_asset(&mut self, logical_name: &str) -> Result<Option<MockAsset>, AssetError> {
        self.lookups.push(logical_name.to_string());
        Ok(self
            .assets
            .iter()
            .find(|(name, _, _)| name == logical_name)
            .map(|(_, logical_path, content)| MockAsset {
                logical_path: logical_path.clone(),
                content: content.clone(),
                writes: Rc::clone(&self.writes),
                fail_suffix: self.fail_suffix.clone(),
            }))
    }
}

#[derive(Debug)]
pub struct MockAsset {
    logical_path: String,
    content: String,
    writes: Rc<RefCell<Vec<WriteCall>>>,
    fail_suffix: Option<String>,
}

impl Artifact for MockAsset {
    fn logical_path(&self) -> &str {
        &self.logical_path
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.content)
    }

    fn write_to(&self, path: &Path, flags: WriteFlags) -> Result<(), AssetError> {
        let path_str = path.to_string_lossy().into_owned();
        if let Some(suffix) = &self.fail_suffix {
            if path_str.ends_with(suffix.as_str()) {
                return Err(AssetError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
        }
        self.writes.borrow_mut().push(WriteCall {
            path: path_str,
            compress: flags.compress,
        });
        Ok(())
    }
}
