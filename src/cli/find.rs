//! Find command implementation.
//!
//! Reads the syntax tree dump of each source file, runs resource discovery
//! and prints the union of everything found.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::cli::args::FindArgs;
use crate::config::PackConfig;
use crate::debug;
use crate::resource::{Classify, ResourceFinder};
use crate::syntax::read_dump;
use crate::utils::path::normalize_path;

/// Suffix appended to a source path to locate its syntax tree dump.
const DUMP_SUFFIX: &str = ".ast.json";

/// Execute find command
pub fn run_find(args: &FindArgs, config: &PackConfig) -> Result<()> {
    if args.ast.is_some() && args.sources.len() > 1 {
        bail!("--ast can only be used with a single source file");
    }

    let classifier = config.classifier();
    let found = collect_resources(&args.sources, args.ast.as_deref(), &classifier)?;

    debug!("find"; "discovery finished"; files = args.sources.len(), resources = found.len());

    if args.json {
        let paths: Vec<_> = found.iter().map(|p| p.to_string_lossy()).collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        for path in &found {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Run discovery on every source and return the sorted union.
///
/// `ast` overrides the dump location of the first source.
pub fn collect_resources<C: Classify + ?Sized>(
    sources: &[PathBuf],
    ast: Option<&Path>,
    classifier: &C,
) -> Result<Vec<PathBuf>> {
    let finder = ResourceFinder::new(classifier);
    let mut all = Vec::new();

    for (i, source) in sources.iter().enumerate() {
        let source = std::path::absolute(source)
            .with_context(|| format!("Failed to resolve {}", source.display()))?;
        let source = normalize_path(&source);

        let dump = match ast {
            Some(ast) if i == 0 => ast.to_path_buf(),
            _ => dump_path_for(&source),
        };
        let roots = read_dump(&dump)
            .with_context(|| format!("Failed to read syntax tree for {}", source.display()))?;

        all.extend(finder.find_resources(&source, &roots));
    }

    all.sort();
    all.dedup();
    Ok(all)
}

/// `index.php` → `index.php.ast.json`
pub fn dump_path_for(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(DUMP_SUFFIX);
    PathBuf::from(name)
}

// ============================================================================
// tests
// ============================================================================
