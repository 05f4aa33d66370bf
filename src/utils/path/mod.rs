//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization and reference resolution

pub mod fs;

pub use fs::{is_contained_relative, normalize_path, resolve_reference};
