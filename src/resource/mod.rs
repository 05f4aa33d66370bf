//! Resource discovery and materialization.
//!
//! | Module    | Purpose                                              |
//! |-----------|------------------------------------------------------|
//! | `kind`    | Extension whitelist and the `Classify` trait         |
//! | `finder`  | Resource references in a file's syntax tree          |
//! | `manager` | Validate, copy and clean resources on disk           |
//! | `error`   | `ResourceError`                                      |

mod error;
mod finder;
mod kind;
mod manager;

pub use finder::ResourceFinder;
pub use kind::{Classify, ExtensionClassifier};
pub use manager::ResourceManager;
