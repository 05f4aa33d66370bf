//! Resource classification by file extension.
//!
//! The whitelist is a fixed table. Extra extensions come from
//! `[classify] extra` in `respack.toml` and are carried by an
//! [`ExtensionClassifier`] value, never by mutating the table.

use std::path::Path;

use rustc_hash::FxHashSet;

/// Category of a shippable resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Style,
    Script,
    Template,
    Text,
    Font,
    Document,
}

/// Lower-case extensions (no leading dot) recognised as resources.
pub const RESOURCE_EXTENSIONS: &[(&str, ResourceKind)] = &[
    // Images
    ("png", ResourceKind::Image),
    ("jpg", ResourceKind::Image),
    ("jpeg", ResourceKind::Image),
    ("gif", ResourceKind::Image),
    ("bmp", ResourceKind::Image),
    ("svg", ResourceKind::Image),
    ("ico", ResourceKind::Image),
    // Styles
    ("css", ResourceKind::Style),
    ("scss", ResourceKind::Style),
    ("less", ResourceKind::Style),
    // Scripts and data
    ("js", ResourceKind::Script),
    ("json", ResourceKind::Script),
    // Templates
    ("html", ResourceKind::Template),
    ("htm", ResourceKind::Template),
    ("twig", ResourceKind::Template),
    // Text
    ("txt", ResourceKind::Text),
    ("md", ResourceKind::Text),
    ("csv", ResourceKind::Text),
    ("xml", ResourceKind::Text),
    // Fonts
    ("ttf", ResourceKind::Font),
    ("otf", ResourceKind::Font),
    ("woff", ResourceKind::Font),
    ("woff2", ResourceKind::Font),
    ("eot", ResourceKind::Font),
    // Documents
    ("pdf", ResourceKind::Document),
    ("doc", ResourceKind::Document),
    ("docx", ResourceKind::Document),
    ("xls", ResourceKind::Document),
    ("xlsx", ResourceKind::Document),
    ("ppt", ResourceKind::Document),
    ("pptx", ResourceKind::Document),
];

/// Multi-dot suffixes matched against the whole file name.
///
/// `view.blade.php` is a template even though plain `.php` is not a resource.
pub const COMPOUND_EXTENSIONS: &[(&str, ResourceKind)] = &[("blade.php", ResourceKind::Template)];

impl ResourceKind {
    /// Classify a path by its file name.
    ///
    /// Case-insensitive. Returns `None` for files without an extension
    /// or with an unknown one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();

        for (suffix, kind) in COMPOUND_EXTENSIONS {
            if let Some(stem) = name.strip_suffix(suffix)
                && stem.len() > 1
                && stem.ends_with('.')
            {
                return Some(*kind);
            }
        }

        Self::from_extension(file_extension(path)?)
    }

    /// Classify a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        RESOURCE_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, kind)| *kind)
    }
}

/// Text after the last dot of the file name.
///
/// Unlike [`Path::extension`], a dotfile such as `.png` has extension `png`.
pub fn file_extension(path: &Path) -> Option<&str> {
    if let Some(ext) = path.extension() {
        return ext.to_str();
    }
    let name = path.file_name()?.to_str()?;
    name.strip_prefix('.').filter(|ext| !ext.is_empty())
}

/// Check a path against the fixed whitelist. Pure, no I/O.
pub fn is_resource_file(path: &Path) -> bool {
    ResourceKind::from_path(path).is_some()
}

// ============================================================================
// Classifier
// ============================================================================

/// Decides whether a path names a shippable resource file.
///
/// The finder only depends on this trait, so discovery can run against
/// any classification policy.
pub trait Classify {
    fn is_resource_file(&self, path: &Path) -> bool;
}

/// Whitelist classifier, optionally widened with extra extensions.
#[derive(Debug, Clone, Default)]
pub struct ExtensionClassifier {
    extra: FxHashSet<String>,
}

impl ExtensionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept additional extensions on top of the whitelist.
    ///
    /// Leading dots are stripped and values are lower-cased.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = extra
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extra }
    }

    fn is_extra(&self, path: &Path) -> bool {
        if self.extra.is_empty() {
            return false;
        }
        file_extension(path).is_some_and(|ext| self.extra.contains(&ext.to_ascii_lowercase()))
    }
}

impl Classify for ExtensionClassifier {
    fn is_resource_file(&self, path: &Path) -> bool {
        is_resource_file(path) || self.is_extra(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_resource_file_case_insensitive() {
        assert!(is_resource_file(Path::new("IMAGE.PNG")));
        assert!(is_resource_file(Path::new("image.png")));
        assert!(is_resource_file(Path::new("/srv/app/Styles.Css")));
    }

    #[test]
    fn test_is_resource_file_rejects_unknown() {
        assert!(!is_resource_file(Path::new("script.php")));
        assert!(!is_resource_file(Path::new("file.unknown")));
        assert!(!is_resource_file(Path::new("Makefile")));
        assert!(!is_resource_file(Path::new("")));
    }

    #[test]
    fn test_every_whitelisted_extension() {
        for (ext, kind) in RESOURCE_EXTENSIONS {
            let name = format!("file.{ext}");
            assert_eq!(ResourceKind::from_path(Path::new(&name)), Some(*kind));
        }
    }

    #[test]
    fn test_blade_templates() {
        assert_eq!(
            ResourceKind::from_path(Path::new("views/home.blade.php")),
            Some(ResourceKind::Template)
        );
        assert_eq!(
            ResourceKind::from_path(Path::new("HOME.BLADE.PHP")),
            Some(ResourceKind::Template)
        );
        // No stem in front of the compound suffix
        assert_eq!(ResourceKind::from_path(Path::new("blade.php")), None);
        assert_eq!(ResourceKind::from_path(Path::new(".blade.php")), None);
    }

    #[test]
    fn test_kind_categories() {
        assert_eq!(ResourceKind::from_extension("WOFF2"), Some(ResourceKind::Font));
        assert_eq!(ResourceKind::from_extension("xlsx"), Some(ResourceKind::Document));
        assert_eq!(ResourceKind::from_extension("json"), Some(ResourceKind::Script));
    }

    #[test]
    fn test_dotfile_extension() {
        assert_eq!(file_extension(Path::new("img/.png")), Some("png"));
        assert_eq!(file_extension(Path::new("a.b.css")), Some("css"));
        assert_eq!(file_extension(Path::new(".")), None);
        assert_eq!(file_extension(Path::new("Makefile")), None);

        assert!(is_resource_file(Path::new("assets/.png")));
        assert!(!is_resource_file(Path::new(".gitignore")));
        assert!(ExtensionClassifier::with_extra(["webp"]).is_resource_file(Path::new(".webp")));
    }

    #[test]
    fn test_extension_classifier_extra() {
        let classifier = ExtensionClassifier::with_extra([".WebP", "avif", ""]);
        assert!(classifier.is_resource_file(Path::new("hero.webp")));
        assert!(classifier.is_resource_file(Path::new("hero.AVIF")));
        assert!(classifier.is_resource_file(Path::new("logo.png")));
        assert!(!classifier.is_resource_file(Path::new("index.php")));

        let plain = ExtensionClassifier::new();
        assert!(!plain.is_resource_file(Path::new("hero.webp")));
    }
}
