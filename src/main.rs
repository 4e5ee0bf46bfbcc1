//! stamp - content-hashed asset writer and template directive rewriter.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, rewrite::Target};
use stamp::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = cli::load_config(&cli)?;

    match &cli.command {
        Commands::Compile { names, path, gzip } => {
            cli::compile::run(config, names, path.clone(), *gzip)
        }
        Commands::Rewrite {
            file,
            in_place,
            output,
        } => {
            let target = match (in_place, output) {
                (true, _) => Target::InPlace,
                (false, Some(output)) => Target::File(output),
                (false, None) => Target::Stdout,
            };
            cli::rewrite::run(config, file, target)
        }
    }
}
