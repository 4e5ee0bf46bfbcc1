//! `stamp compile`: write assets under content-hashed names.

use anyhow::{Result, bail};
use stamp::config::StampConfig;
use stamp::logger::ProgressLine;
use stamp::{WriteOptions, log};

/// Compile each name and print its hashed file name to stdout.
///
/// Every name is attempted; missing names fail the command at the end.
pub fn run(
    config: StampConfig,
    names: &[String],
    path: Option<String>,
    gzip: Option<bool>,
) -> Result<()> {
    let mut options = config.write_options();
    if path.is_some() {
        options.path = path;
    }
    if let Some(gzip) = gzip {
        options.gzip = gzip;
    }

    let hashed = compile_all(config, names, &options)?;

    let mut missing = Vec::new();
    for (name, output) in names.iter().zip(&hashed) {
        match output {
            Some(output) => println!("{output}"),
            None => missing.push(name.as_str()),
        }
    }

    if !missing.is_empty() {
        bail!("asset not found: {}", missing.join(", "));
    }
    Ok(())
}

/// Write every name, returning the hashed name (or `None`) per input.
pub fn compile_all(
    config: StampConfig,
    names: &[String],
    options: &WriteOptions,
) -> Result<Vec<Option<String>>> {
    let mut manager = config.into_manager();
    let progress = (names.len() > 1).then(|| ProgressLine::new(&[("assets", names.len())]));

    let mut hashed = Vec::with_capacity(names.len());
    for name in names {
        let output = manager.write(name, options)?;
        match &output {
            Some(output) => log!("compile"; "{} -> {}", name, output),
            None => log!("error"; "asset not found: {}", name),
        }
        if let Some(progress) = &progress {
            progress.inc("assets");
        }
        hashed.push(output);
    }

    if let Some(progress) = progress {
        progress.finish();
    }
    Ok(hashed)
}
