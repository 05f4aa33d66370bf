//! Resource materialization errors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while validating, copying or cleaning resources.
///
/// Every variant names the offending path. Any of them aborts the
/// operation that raised it.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to create directory `{}`", .0.display())]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to copy resource `{}` to `{}`", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("failed to read directory `{}`", .0.display())]
    ReadDir(PathBuf, #[source] io::Error),

    #[error("failed to remove directory `{}`", .0.display())]
    RemoveDir(PathBuf, #[source] io::Error),

    #[error("failed to remove file `{}`", .0.display())]
    RemoveFile(PathBuf, #[source] io::Error),

    #[error("resource file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("destination `{}` escapes the output directory", .0.display())]
    OutsideOutput(PathBuf),

    #[error("resource directory `{}` contains the output directory", .0.display())]
    ContainsOutput(PathBuf),
}

impl ResourceError {
    /// The path the failure is about (the source side for copies).
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir(path, _)
            | Self::ReadDir(path, _)
            | Self::RemoveDir(path, _)
            | Self::RemoveFile(path, _)
            | Self::NotFound(path)
            | Self::OutsideOutput(path)
            | Self::ContainsOutput(path) => path,
            Self::Copy { from, .. } => from,
        }
    }
}
