//! Command-line interface module.

mod args;
pub mod compile;
pub mod rewrite;

pub use args::{Cli, Commands};

use anyhow::{Context, Result, bail};
use stamp::config::{CONFIG_FILE, StampConfig};

/// Load `stamp.toml` and apply command-line overrides.
///
/// A missing config file is fine when it is the default one; an explicitly
/// named file must exist.
pub fn load_config(cli: &Cli) -> Result<StampConfig> {
    let mut config = if cli.config.exists() {
        StampConfig::from_path(&cli.config)
            .with_context(|| format!("failed to load `{}`", cli.config.display()))?
    } else if cli.config.as_os_str() == CONFIG_FILE {
        StampConfig::default()
    } else {
        bail!("config file `{}` not found", cli.config.display());
    };

    if let Some(asset_type) = &cli.asset_type {
        config.asset_type = asset_type.clone();
    }
    if let Some(directory) = &cli.directory {
        config.directory = Some(directory.clone());
    }
    config.paths.extend(cli.include.iter().cloned());

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "type = \"javascripts\"\npaths = [\"js\"]\ngzip = true\n").unwrap();

        let cli = Cli::parse_from([
            "stamp",
            "-C",
            path.to_str().unwrap(),
            "-t",
            "stylesheets",
            "-d",
            "/srv",
            "-I",
            "vendor",
            "compile",
            "app",
        ]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.asset_type, "stylesheets");
        assert_eq!(config.directory.as_deref(), Some("/srv"));
        assert_eq!(config.paths, ["js", "vendor"]);
        assert!(config.gzip);
    }

    #[test]
    fn test_load_config_explicit_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let cli = Cli::parse_from(["stamp", "-C", path.to_str().unwrap(), "compile", "app"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_load_config_rejects_bad_type_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "").unwrap();

        let cli = Cli::parse_from(["stamp", "-C", path.to_str().unwrap(), "-t", "", "compile", "app"]);
        assert!(load_config(&cli).is_err());
    }
}
