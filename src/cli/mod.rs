//! Command-line interface module.

mod args;
pub mod build;
pub mod find;

pub use args::{Cli, Commands};
