//! Resource materialization: validation, copying and output cleaning.
//!
//! Every operation is synchronous and fail-fast. Nothing is rolled back:
//! whatever was copied or removed before a failure stays that way.
//!
//! ```text
//! respack.toml                      dist/
//! [assets]
//! "resources/logo.png" = "img/logo.png"   → dist/img/logo.png
//! "public"             = "public"         → dist/public/** (recursive)
//! ```

use std::fs;
use std::path::Path;

use super::error::ResourceError;
use super::kind::{Classify, ExtensionClassifier};
use crate::config::PackConfig;
use crate::utils::path::is_contained_relative;
use crate::{debug, log};

/// Copies, validates and cleans the resources declared in a [`PackConfig`].
///
/// Assumes exclusive ownership of the output directory while it runs.
pub struct ResourceManager<'a> {
    config: &'a PackConfig,
    classifier: ExtensionClassifier,
}

impl<'a> ResourceManager<'a> {
    pub fn new(config: &'a PackConfig) -> Self {
        Self {
            config,
            classifier: config.classifier(),
        }
    }

    /// Copy every asset map entry into the output directory, in map order.
    ///
    /// Returns the number of entries copied.
    pub fn copy_resources(&self) -> Result<usize, ResourceError> {
        let assets = self.config.assets();
        let output_dir = self.config.output_dir();

        log!("assets"; "copying resources"; count = assets.len());

        for (source, relative) in assets.iter() {
            if !is_contained_relative(relative) {
                return Err(ResourceError::OutsideOutput(relative.to_path_buf()));
            }
            if source.is_dir() && output_dir.starts_with(source) {
                return Err(ResourceError::ContainsOutput(source.to_path_buf()));
            }
            self.copy_resource(source, &output_dir.join(relative))?;
        }

        log!("assets"; "resources copied successfully");
        Ok(assets.len())
    }

    /// Copy one file or directory to `target`.
    ///
    /// Parent directories of `target` are created as needed. Directories
    /// are copied recursively; files are copied byte for byte, replacing
    /// whatever is at `target`.
    pub fn copy_resource(&self, source: &Path, target: &Path) -> Result<(), ResourceError> {
        debug!("assets"; "copying resource"; source = source.display(), target = target.display());

        if let Some(parent) = target.parent() {
            ensure_dir(parent)?;
        }

        if source.is_dir() {
            copy_dir_recursive(source, target)
        } else {
            copy_file(source, target)
        }
    }

    /// Empty the output directory when cleaning is enabled.
    ///
    /// The directory itself is kept. Missing directories and disabled
    /// cleaning are both no-ops.
    pub fn clean_output_dir(&self) -> Result<(), ResourceError> {
        if !self.config.should_clean() {
            return Ok(());
        }

        let output_dir = self.config.output_dir();
        log!("clean"; "cleaning output directory"; dir = output_dir.display());

        if output_dir.is_dir() {
            remove_dir_contents(output_dir)?;
        }
        Ok(())
    }

    /// Check that every asset source exists.
    ///
    /// Reports the first missing source. Destinations are not checked.
    pub fn validate_resources(&self) -> Result<(), ResourceError> {
        for (source, _) in self.config.assets().iter() {
            if !source.exists() {
                return Err(ResourceError::NotFound(source.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Whether `path` is a shippable resource file.
    pub fn is_resource_file(&self, path: &Path) -> bool {
        self.classifier.is_resource_file(path)
    }
}

// ============================================================================
// Filesystem helpers
// ============================================================================

fn ensure_dir(dir: &Path) -> Result<(), ResourceError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|err| ResourceError::CreateDir(dir.to_path_buf(), err))
}

fn copy_file(source: &Path, target: &Path) -> Result<(), ResourceError> {
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|err| ResourceError::Copy {
            from: source.to_path_buf(),
            to: target.to_path_buf(),
            err,
        })
}

/// Recursively copy directory contents.
///
/// Entries are visited in the order the OS returns them.
fn copy_dir_recursive(src_dir: &Path, dest_dir: &Path) -> Result<(), ResourceError> {
    ensure_dir(dest_dir)?;

    let entries =
        fs::read_dir(src_dir).map_err(|err| ResourceError::ReadDir(src_dir.to_path_buf(), err))?;
    for entry in entries {
        let entry = entry.map_err(|err| ResourceError::ReadDir(src_dir.to_path_buf(), err))?;
        let src_path = entry.path();
        let dest_path = dest_dir.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            copy_file(&src_path, &dest_path)?;
        }
    }

    Ok(())
}

/// Remove everything inside `dir`, keeping `dir` itself.
///
/// Symlinks are unlinked, never followed.
fn remove_dir_contents(dir: &Path) -> Result<(), ResourceError> {
    let entries =
        fs::read_dir(dir).map_err(|err| ResourceError::ReadDir(dir.to_path_buf(), err))?;
    for entry in entries {
        let entry = entry.map_err(|err| ResourceError::ReadDir(dir.to_path_buf(), err))?;
        let path = entry.path();
        let is_dir = entry
            .file_type()
            .map(|ty| ty.is_dir())
            .map_err(|err| ResourceError::ReadDir(dir.to_path_buf(), err))?;

        if is_dir {
            remove_dir_contents(&path)?;
            fs::remove_dir(&path).map_err(|err| ResourceError::RemoveDir(path.clone(), err))?;
        } else {
            fs::remove_file(&path).map_err(|err| ResourceError::RemoveFile(path.clone(), err))?;
        }
    }

    Ok(())
}
