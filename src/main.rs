//! respack - discovers and bundles resources referenced by PHP sources.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod resource;
mod syntax;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PackConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PackConfig::load(&cli)?;

    match &cli.command {
        Commands::Find { args } => cli::find::run_find(args, &config),
        Commands::Validate => cli::build::validate_assets(&config),
        Commands::Clean => cli::build::clean_output(&config),
        Commands::Copy => cli::build::copy_assets(&config),
        Commands::Build { args } => cli::build::build(&config, args),
    }
}
