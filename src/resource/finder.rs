//! Resource reference discovery over a syntax tree.
//!
//! Two reference shapes are recognised:
//!
//! - **string literals** that look like paths (`'img/logo.png'`), accepted
//!   when the resolved file exists and classifies as a resource;
//! - **includes** with a literal operand (`include 'tpl/page.php'`),
//!   accepted when the file exists and either classifies as a resource or
//!   is a `.php` template.
//!
//! Literals are probed speculatively, so nothing here reports errors:
//! candidates that do not resolve are dropped.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::kind::{Classify, file_extension};
use crate::syntax::{NodeKind, SyntaxNode, preorder};
use crate::utils::path::resolve_reference;

/// Deduplicated absolute paths of resources referenced by one file.
pub type FoundResources = FxHashSet<PathBuf>;

/// Include targets with this exact extension are treated as templates.
const TEMPLATE_INCLUDE_EXTENSION: &str = "php";

/// Finds resource references in the syntax tree of one source file.
pub struct ResourceFinder<'a, C: ?Sized> {
    classifier: &'a C,
}

impl<'a, C: Classify + ?Sized> ResourceFinder<'a, C> {
    pub fn new(classifier: &'a C) -> Self {
        Self { classifier }
    }

    /// Walk `roots` (the statements of `current_file`) and collect every
    /// resource they reference.
    ///
    /// Relative references resolve against the directory of `current_file`.
    /// A path referenced several times is reported once.
    pub fn find_resources(&self, current_file: &Path, roots: &[SyntaxNode]) -> FoundResources {
        let mut found = FoundResources::default();

        for node in preorder(roots) {
            match node.kind() {
                NodeKind::StringLiteral => {
                    if let Some(value) = node.literal_value()
                        && let Some(path) = self.check_literal(current_file, value)
                    {
                        found.insert(path);
                    }
                }
                NodeKind::Include => {
                    if let Some(path) = self.check_include(current_file, node) {
                        found.insert(path);
                    }
                }
                NodeKind::Other(_) => {}
            }
        }

        crate::debug!("find"; "scanned {}", current_file.display(); resources = found.len());
        found
    }

    /// Candidate check for a bare string literal.
    fn check_literal(&self, current_file: &Path, value: &str) -> Option<PathBuf> {
        // Heuristic: strings without a separator or a dot are almost never paths
        if !looks_like_path(value) {
            return None;
        }

        let path = resolve_reference(current_file, value);
        (path.exists() && self.classifier.is_resource_file(&path)).then_some(path)
    }

    /// Include handling; dynamic operands cannot be resolved statically.
    fn check_include(&self, current_file: &Path, node: &SyntaxNode) -> Option<PathBuf> {
        let value = node.include_operand()?.literal_value()?;

        let path = resolve_reference(current_file, value);
        if !path.exists() {
            return None;
        }

        let accepted = self.classifier.is_resource_file(&path) || is_template_include(&path);
        accepted.then_some(path)
    }
}

/// Cheap filter run before any filesystem probe.
///
/// Best effort: `"v1.2"` passes and costs one existence check.
fn looks_like_path(value: &str) -> bool {
    value.contains('/') || value.contains('.')
}

fn is_template_include(path: &Path) -> bool {
    file_extension(path) == Some(TEMPLATE_INCLUDE_EXTENSION)
}
