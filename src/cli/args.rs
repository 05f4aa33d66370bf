//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// respack resource bundler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: respack.toml)
    #[arg(short = 'C', long, default_value = "respack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Find resources referenced by source files
    #[command(visible_alias = "f")]
    Find {
        #[command(flatten)]
        args: FindArgs,
    },

    /// Check that every declared asset exists
    #[command(visible_alias = "v")]
    Validate,

    /// Empty the output directory
    Clean,

    /// Copy declared assets into the output directory
    Copy,

    /// Validate, clean and copy in one go
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
}

/// Find command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FindArgs {
    /// Source files to scan. Each is read from its `<SOURCE>.ast.json` dump.
    #[arg(required = true, value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub sources: Vec<PathBuf>,

    /// Syntax tree dump to use instead of `<SOURCE>.ast.json` (single source only)
    #[arg(long, value_name = "DUMP", value_hint = clap::ValueHint::FilePath)]
    pub ast: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(short, long)]
    pub json: bool,
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before copying
    #[arg(short, long)]
    pub clean: bool,

    /// Source files whose discovered resources join the asset map
    #[arg(short, long, num_args = 1.., value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub scan: Vec<PathBuf>,
}

impl Commands {
    /// Whether the command cannot run without a config file.
    pub const fn needs_config(&self) -> bool {
        !matches!(self, Self::Find { .. })
    }
}

#[allow(unused)]
impl Cli {
    pub const fn is_find(&self) -> bool {
        matches!(self.command, Commands::Find { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
