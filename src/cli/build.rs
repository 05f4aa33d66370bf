//! Materialization commands.
//!
//! Build pipeline phases:
//! - **Scan** - Optional discovery on `--scan` sources, merged into the asset map
//! - **Validate** - Every asset source must exist
//! - **Clean** - Empty the output directory when requested
//! - **Copy** - Copy assets into the output directory in declaration order

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::args::BuildArgs;
use super::find::collect_resources;
use crate::config::PackConfig;
use crate::resource::ResourceManager;
use crate::{debug, log};

/// `respack validate`
pub fn validate_assets(config: &PackConfig) -> Result<()> {
    ResourceManager::new(config)
        .validate_resources()
        .context("Asset validation failed")?;
    log!("validate"; "all assets present"; count = config.assets().len());
    Ok(())
}

/// `respack clean`
pub fn clean_output(config: &PackConfig) -> Result<()> {
    ResourceManager::new(config)
        .clean_output_dir()
        .with_context(|| format!("Failed to clean {}", config.output_dir().display()))
}

/// `respack copy`
pub fn copy_assets(config: &PackConfig) -> Result<()> {
    ResourceManager::new(config)
        .copy_resources()
        .context("Failed to copy assets")?;
    Ok(())
}

/// `respack build`: scan → validate → clean → copy.
pub fn build(config: &PackConfig, args: &BuildArgs) -> Result<()> {
    let mut config = config.clone();

    if !args.scan.is_empty() {
        let found = collect_resources(&args.scan, None, &config.classifier())?;
        let added = add_discovered(&mut config, &found);
        log!("build"; "merged discovered resources"; found = found.len(), added = added);
    }

    let manager = ResourceManager::new(&config);
    manager
        .validate_resources()
        .context("Asset validation failed")?;
    manager
        .clean_output_dir()
        .with_context(|| format!("Failed to clean {}", config.output_dir().display()))?;
    let copied = manager.copy_resources().context("Failed to copy assets")?;

    log!("build"; "done"; copied = copied, output = config.output_dir().display());
    Ok(())
}

/// Add discovered resources to the asset map.
///
/// The destination mirrors the path relative to the project root. Declared
/// entries keep their destination; resources outside the root are skipped.
/// Returns the number of entries added.
pub fn add_discovered(config: &mut PackConfig, found: &[PathBuf]) -> usize {
    let mut added = 0;
    for path in found {
        let Some(relative) = relative_to_root(config.get_root(), path) else {
            log!("warning"; "skipping resource outside the project root: {}", path.display());
            continue;
        };
        if config.assets.insert(path.clone(), relative) {
            added += 1;
        } else {
            debug!("build"; "already declared: {}", path.display());
        }
    }
    added
}

fn relative_to_root(root: &Path, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(root).ok()?;
    (!relative.as_os_str().is_empty()).then(|| relative.to_path_buf())
}

// ============================================================================
// tests
// ============================================================================
