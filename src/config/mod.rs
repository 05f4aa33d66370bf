//! Project configuration management for `respack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── assets.rs      # [assets] ordered source → destination map
//! ├── error.rs       # ConfigError
//! ├── util.rs        # config discovery, tilde expansion
//! └── mod.rs         # PackConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key                | Purpose                                         |
//! |--------------------|-------------------------------------------------|
//! | `output`           | Output root, relative to the config file        |
//! | `clean`            | Empty the output root before copying            |
//! | `[assets]`         | `source = "destination"` pairs                  |
//! | `[classify] extra` | Extensions treated as resources in addition     |

mod assets;
mod error;
mod util;

pub use assets::AssetMap;
pub use error::ConfigError;

use util::{expand_tilde, find_config_file};

use crate::{
    cli::{Cli, Commands},
    log,
    resource::ExtensionClassifier,
    utils::path::{is_contained_relative, normalize_path},
};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing respack.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output directory resources are copied into
    pub output: PathBuf,

    /// Whether `clean_output_dir` may empty the output directory
    pub clean: bool,

    /// Declared assets
    pub assets: AssetMap,

    /// Classification settings
    pub classify: ClassifyConfig,
}

/// `[classify]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Extra extensions accepted as resources (e.g. `["webp"]`)
    pub extra: Vec<String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            output: PathBuf::from("dist"),
            clean: false,
            assets: AssetMap::new(),
            classify: ClassifyConfig::default(),
        }
    }
}

impl PackConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory. `find` runs without a config
    /// file, using the cwd as root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = normalize_path(&path);
                (config, root)
            }
            None if cli.command.needs_config() => {
                bail!(
                    "Config file '{}' not found in {} or any parent directory",
                    cli.config.display(),
                    cwd.display()
                );
            }
            None => (Self::default(), cwd),
        };

        config.apply_command_options(cli);
        config.validate_paths()?;
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Declared assets, in declaration order
    pub fn assets(&self) -> &AssetMap {
        &self.assets
    }

    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    pub fn should_clean(&self) -> bool {
        self.clean
    }

    /// Build the classifier described by `[classify]`.
    pub fn classifier(&self) -> ExtensionClassifier {
        ExtensionClassifier::with_extra(&self.classify.extra)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }

        match &cli.command {
            Commands::Build { args } => self.clean |= args.clean,
            // An explicit `clean` is the request to clean
            Commands::Clean => self.clean = true,
            Commands::Find { .. } | Commands::Validate | Commands::Copy => {}
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);

        self.output = normalize_path(&root.join(expand_tilde(&self.output)));
        self.assets
            .map_sources(|source| normalize_path(&root.join(expand_tilde(source))));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Pre-validate paths before normalization.
    fn validate_paths(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            bail!(ConfigError::Validation("`output` must not be empty".into()));
        }

        for (_, target) in self.assets.iter() {
            if !is_contained_relative(target) {
                bail!(ConfigError::Validation(format!(
                    "asset destination `{}` must be relative and stay inside the output directory",
                    target.display()
                )));
            }
        }
        Ok(())
    }

    /// Validate the normalized configuration.
    pub fn validate(&self) -> Result<()> {
        if self.clean && self.root.starts_with(&self.output) {
            bail!(ConfigError::Validation(format!(
                "refusing to clean `{}`: it contains the project root",
                self.output.display()
            )));
        }

        for source in self.assets.sources() {
            if source.is_dir() && self.output.starts_with(source) {
                bail!(ConfigError::Validation(format!(
                    "asset directory `{}` contains the output directory `{}`",
                    source.display(),
                    self.output.display()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
output = "build"
clean = true

[assets]
"resources/logo.png" = "img/logo.png"
"public" = "public"

[classify]
extra = ["webp"]
"#;

    #[test]
    fn test_from_str() {
        let config = PackConfig::from_str(SAMPLE).unwrap();
        assert_eq!(config.output, PathBuf::from("build"));
        assert!(config.should_clean());
        assert_eq!(config.assets().len(), 2);
        assert_eq!(config.classify.extra, ["webp"]);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(PackConfig::from_str("[assets\n\"a\" = \"b\"").is_err());
    }

    #[test]
    fn test_default() {
        let config = PackConfig::default();
        assert_eq!(config.output_dir(), Path::new("dist"));
        assert!(!config.should_clean());
        assert!(config.assets().is_empty());
        assert_eq!(config.get_root(), Path::new(""));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "output = \"dist\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PackConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.output, PathBuf::from("dist"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = PackConfig::parse_with_ignored(SAMPLE).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_normalize_paths() {
        let dir = TempDir::new().unwrap();
        let mut config = PackConfig::from_str(SAMPLE).unwrap();
        config.normalize_paths(dir.path());

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.output_dir(), root.join("build"));

        let pairs: Vec<_> = config.assets().iter().collect();
        assert_eq!(
            pairs,
            [
                (root.join("resources/logo.png").as_path(), Path::new("img/logo.png")),
                (root.join("public").as_path(), Path::new("public")),
            ]
        );
    }

    #[test]
    fn test_validate_paths_rejects_escaping_destination() {
        let config = PackConfig::from_str("[assets]\n\"a.css\" = \"../a.css\"").unwrap();
        assert!(config.validate_paths().is_err());

        let config = PackConfig::from_str("output = \"\"").unwrap();
        assert!(config.validate_paths().is_err());
    }

    #[test]
    fn test_validate_refuses_cleaning_root() {
        let dir = TempDir::new().unwrap();
        let mut config = PackConfig::from_str("output = \".\"\nclean = true").unwrap();
        config.normalize_paths(dir.path());
        assert!(config.validate().is_err());

        config.clean = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_refuses_asset_containing_output() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let mut config =
            PackConfig::from_str("output = \"public/dist\"\n[assets]\n\"public\" = \"site\"")
                .unwrap();
        config.normalize_paths(dir.path());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contains the output directory"));

        // A sibling output is fine
        let mut config =
            PackConfig::from_str("output = \"dist\"\n[assets]\n\"public\" = \"site\"").unwrap();
        config.normalize_paths(dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_command_options() {
        let mut config = PackConfig::default();
        let cli = Cli::parse_from(["respack", "--output", "public", "build", "--clean"]);
        config.apply_command_options(&cli);
        assert_eq!(config.output, PathBuf::from("public"));
        assert!(config.clean);

        let mut config = PackConfig::default();
        config.apply_command_options(&Cli::parse_from(["respack", "clean"]));
        assert!(config.clean);

        let mut config = PackConfig::default();
        config.apply_command_options(&Cli::parse_from(["respack", "copy"]));
        assert!(!config.clean);
    }

    #[test]
    fn test_classifier_uses_extra() {
        let config = PackConfig::from_str(SAMPLE).unwrap();
        let classifier = config.classifier();
        use crate::resource::Classify;
        assert!(classifier.is_resource_file(Path::new("hero.webp")));
    }
}
