//! Asset manager: binds options and search paths to a lazily built
//! environment, then writes and rewrites through it.
//!
//! # Module Structure
//!
//! ```text
//! manager/
//! ├── mod.rs       # AssetManager, environment binding (this file)
//! ├── writer.rs    # content-hashed output files
//! └── rewrite.rs   # template directive substitution
//! ```
//!
//! # Lifecycle
//!
//! The environment is created on first access and lives as long as the
//! manager. Options and paths are applied to it once, on the first call to
//! [`AssetManager::compiled`]. Every entry point that may build it takes
//! `&mut self`, so double initialization cannot happen.

mod rewrite;
mod writer;

pub use rewrite::{Directive, DirectiveKind, directive_pattern, scan};
pub use writer::{WriteOptions, digest_name, output_path, target_directory};

use regex::Regex;

use crate::debug;
use crate::environment::Environment;
use crate::options::{MANAGER_KEYS, Options};
use crate::utils::path::join_slash;

/// Directive verb used when none is given.
pub const DEFAULT_ASSET_TYPE: &str = "javascripts";

pub struct AssetManager<E: Environment> {
    options: Options,
    paths: Vec<String>,
    directory: Option<String>,
    asset_type: String,
    factory: Box<dyn Fn() -> E>,
    environment: Option<E>,
    loaded: bool,
    /// Compiled directive pattern, dropped whenever delimiters or type change.
    pattern: Option<Regex>,
}

impl<E: Environment + Default + 'static> AssetManager<E> {
    /// Manager whose environment is built with `E::default()`.
    pub fn new(asset_type: impl Into<String>) -> Self {
        Self::with_factory(asset_type, E::default)
    }
}

impl<E: Environment> AssetManager<E> {
    /// Manager whose environment is built by `factory` on first access.
    pub fn with_factory(asset_type: impl Into<String>, factory: impl Fn() -> E + 'static) -> Self {
        Self {
            options: Options::defaults(),
            paths: Vec::new(),
            directory: None,
            asset_type: asset_type.into(),
            factory: Box::new(factory),
            environment: None,
            loaded: false,
            pattern: None,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_paths(paths);
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.set_directory(Some(directory.into()));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Defaults merged with the last assigned options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Merge `options` over the defaults (not over the current value).
    pub fn set_options(&mut self, options: Options) {
        self.options = Options::merged(options);
        self.pattern = None;
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn set_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub fn set_directory(&mut self, directory: Option<String>) {
        self.directory = directory;
    }

    /// Directive verb, e.g. `javascripts`.
    pub fn asset_type(&self) -> &str {
        &self.asset_type
    }

    pub fn set_asset_type(&mut self, asset_type: impl Into<String>) {
        self.asset_type = asset_type.into();
        self.pattern = None;
    }

    /// Whether options and paths have been applied to the environment.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // ========================================================================
    // Environment binding
    // ========================================================================

    /// The memoized environment, built on first call.
    pub fn environment(&mut self) -> &mut E {
        let factory = &self.factory;
        self.environment.get_or_insert_with(|| factory())
    }

    /// Apply every recognized option present in the merged set.
    ///
    /// Keys the environment does not declare are skipped.
    pub fn load_options(&mut self) {
        let setters = E::option_setters();

        for (key, _) in self.options.iter() {
            let recognized = setters.iter().any(|s| s.key == key);
            if !recognized && !MANAGER_KEYS.contains(&key) {
                debug!("options"; "ignoring unrecognized option `{}`", key);
            }
        }

        let factory = &self.factory;
        let env = self.environment.get_or_insert_with(|| factory());
        for setter in setters {
            if let Some(value) = self.options.get(setter.key) {
                debug!("options"; "{} = {}", setter.key, value);
                (setter.apply)(env, value);
            }
        }
    }

    /// Register each path, qualified by the base directory, in order.
    pub fn load_paths(&mut self) {
        let factory = &self.factory;
        let env = self.environment.get_or_insert_with(|| factory());
        for path in &self.paths {
            let qualified = match &self.directory {
                Some(directory) => join_slash(directory, path),
                None => path.clone(),
            };
            debug!("paths"; "{}", qualified);
            env.append_path(&qualified);
        }
    }

    /// The environment with options and paths applied exactly once.
    pub fn compiled(&mut self) -> &mut E {
        if !self.loaded {
            self.loaded = true;
            self.load_options();
            self.load_paths();
        }
        self.environment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::mock::MockEnvironment;
    use crate::options::OptionValue;
    use std::cell::Cell;
    use std::rc::Rc;

    fn manager() -> AssetManager<MockEnvironment> {
        AssetManager::new("javascripts")
    }

    #[test]
    fn test_options_are_defaults_merged() {
        let user = Options::from_iter([("js_compressor", "oxc"), ("extra", "1")]);
        let m = manager().with_options(user.clone());
        assert_eq!(m.options(), &Options::merged(user));
        assert_eq!(manager().options(), &Options::defaults());
    }

    #[test]
    fn test_set_options_relative_to_defaults() {
        let mut m = manager();
        m.set_options(Options::from_iter([("a", "1")]));
        m.set_options(Options::from_iter([("b", "2")]));

        assert!(!m.options().contains_key("a"));
        assert_eq!(m.options().get_str("b"), Some("2"));
        assert_eq!(m.options().source_open(), "[%");
    }

    #[test]
    fn test_environment_memoized() {
        let built = Rc::new(Cell::new(0));
        let counter = Rc::clone(&built);
        let mut m = AssetManager::with_factory("javascripts", move || {
            counter.set(counter.get() + 1);
            MockEnvironment::default()
        });

        assert_eq!(built.get(), 0);
        m.environment().paths.push("marker".into());
        m.environment();
        m.compiled();
        assert_eq!(built.get(), 1);
        assert_eq!(m.environment().paths, ["marker"]);
    }

    #[test]
    fn test_load_options_only_recognized() {
        let mut m = manager().with_options(Options::from_iter([
            ("js_compressor", OptionValue::from("oxc")),
            ("not_a_setter", OptionValue::from(true)),
        ]));
        m.load_options();

        let mut keys = m.environment().applied_keys();
        keys.sort_unstable();
        // css_compressor comes from the defaults; `debug` is recognized but unset
        assert_eq!(keys, ["css_compressor", "js_compressor"]);
        assert_eq!(
            m.environment().applied[0],
            ("js_compressor".to_string(), OptionValue::from("oxc"))
        );
    }

    #[test]
    fn test_load_options_recognized_but_absent() {
        let mut m = manager().with_options(Options::from_iter([("debug", true)]));
        m.load_options();
        assert!(m.environment().applied_keys().contains(&"debug"));

        let mut plain = manager();
        plain.load_options();
        assert!(!plain.environment().applied_keys().contains(&"debug"));
    }

    #[test]
    fn test_load_paths_with_directory() {
        let mut m = manager()
            .with_paths(["javascripts", "vendor"])
            .with_directory("/srv/assets");
        m.load_paths();
        assert_eq!(
            m.environment().paths,
            ["/srv/assets/javascripts", "/srv/assets/vendor"]
        );
    }

    #[test]
    fn test_load_paths_without_directory() {
        let mut m = manager().with_paths(["javascripts", "vendor"]);
        m.load_paths();
        assert_eq!(m.environment().paths, ["javascripts", "vendor"]);
    }

    #[test]
    fn test_load_paths_empty() {
        let mut m = manager();
        m.load_paths();
        assert!(m.environment().paths.is_empty());
    }

    #[test]
    fn test_compiled_loads_once() {
        let mut m = manager()
            .with_options(Options::from_iter([("js_compressor", "oxc")]))
            .with_paths(["javascripts"]);
        assert!(!m.is_loaded());

        for _ in 0..3 {
            m.compiled();
        }

        assert!(m.is_loaded());
        let env = m.environment();
        assert_eq!(env.paths, ["javascripts"]);
        assert_eq!(env.applied.len(), 2);
    }

    #[test]
    fn test_setters_after_load_not_reapplied() {
        let mut m = manager().with_paths(["a"]);
        m.compiled();
        m.set_paths(["b"]);
        m.compiled();
        assert_eq!(m.environment().paths, ["a"]);
        assert_eq!(m.paths(), ["b"]);
    }

    #[test]
    fn test_asset_type_and_directory_accessors() {
        let mut m = manager();
        assert_eq!(m.asset_type(), DEFAULT_ASSET_TYPE);
        assert_eq!(m.directory(), None);

        m.set_asset_type("stylesheets");
        m.set_directory(Some("/tmp/dir".into()));
        assert_eq!(m.asset_type(), "stylesheets");
        assert_eq!(m.directory(), Some("/tmp/dir"));
    }
}
