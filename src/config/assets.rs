//! `[assets]` section: ordered source → destination mapping.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! "resources/logo.png" = "img/logo.png"   # file → output/img/logo.png
//! "public" = "public"                      # directory, copied recursively
//! ```
//!
//! Entries keep the order they are declared in. Destinations are relative
//! to the output directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Ordered mapping from asset source to output-relative destination.
///
/// Sources are unique; the first declaration of a source wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    entries: Vec<(PathBuf, PathBuf)>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(source, destination)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_path(), target.as_path()))
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(source, _)| source.as_path())
    }

    pub fn contains_source(&self, source: &Path) -> bool {
        self.entries.iter().any(|(s, _)| s == source)
    }

    /// Append an entry. Returns `false` (and keeps the existing entry)
    /// when `source` is already mapped.
    pub fn insert(&mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> bool {
        let source = source.into();
        if self.contains_source(&source) {
            return false;
        }
        self.entries.push((source, target.into()));
        true
    }

    /// Rewrite every source path, keeping order and destinations.
    pub(super) fn map_sources(&mut self, mut f: impl FnMut(&Path) -> PathBuf) {
        for (source, _) in &mut self.entries {
            *source = f(source);
        }
    }
}

impl FromIterator<(PathBuf, PathBuf)> for AssetMap {
    fn from_iter<I: IntoIterator<Item = (PathBuf, PathBuf)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (source, target) in iter {
            map.insert(source, target);
        }
        map
    }
}

impl<'de> Deserialize<'de> for AssetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AssetMapVisitor;

        impl<'de> Visitor<'de> for AssetMapVisitor {
            type Value = AssetMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of `source = \"destination\"` paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AssetMap, A::Error> {
                let mut map = AssetMap::new();
                while let Some((source, target)) = access.next_entry::<PathBuf, PathBuf>()? {
                    if map.contains_source(&source) {
                        return Err(de::Error::custom(format!(
                            "duplicate asset source `{}`",
                            source.display()
                        )));
                    }
                    map.insert(source, target);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AssetMapVisitor)
    }
}
