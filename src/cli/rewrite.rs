//! `stamp rewrite`: substitute asset directives in a template.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use stamp::config::StampConfig;
use stamp::log;

/// Where the rewritten template goes.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    InPlace,
    File(&'a Path),
    Stdout,
}

pub fn run(config: StampConfig, file: &Path, target: Target<'_>) -> Result<()> {
    let mut manager = config.into_manager();
    let mut text = fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;

    match target {
        Target::InPlace => {
            manager.rewrite_in_place(&mut text)?;
            write_file(file, &text)?;
            log!("rewrite"; "{}", file.display());
        }
        Target::File(output) => {
            let rewritten = manager.rewrite(&text)?;
            write_file(output, &rewritten)?;
            log!("rewrite"; "{} -> {}", file.display(), output.display());
        }
        Target::Stdout => {
            let rewritten = manager.rewrite(&text)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rewritten.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write `{}`", path.display()))
}
