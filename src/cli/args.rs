//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use stamp::config::CONFIG_FILE;

/// Content-hashed asset writer and template rewriter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Directive verb (overrides `type` in the config file)
    #[arg(short = 't', long = "type", global = true)]
    pub asset_type: Option<String>,

    /// Base directory for search paths and output
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub directory: Option<String>,

    /// Additional search path (repeatable, appended after config paths)
    #[arg(short = 'I', long = "include", global = true, value_hint = clap::ValueHint::DirPath)]
    pub include: Vec<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile assets and write them under content-hashed names
    #[command(visible_alias = "c")]
    Compile {
        /// Logical asset names
        #[arg(required = true)]
        names: Vec<String>,

        /// Output path (absolute, or relative to --directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Also write gzip variants
        #[arg(short = 'z', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        gzip: Option<bool>,
    },

    /// Rewrite asset directives in a template
    ///
    /// Linked assets are written to --directory (or the working directory).
    /// The config keys `output` and `gzip` apply to `compile` only.
    #[command(visible_alias = "r")]
    Rewrite {
        /// Template file to rewrite
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Rewrite the file in place
        #[arg(short, long, conflicts_with = "output")]
        in_place: bool,

        /// Write the result to this file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}
