//! Syntax tree input for resource discovery.
//!
//! | Module | Purpose                                         |
//! |--------|-------------------------------------------------|
//! | `node` | Node model: kind tag + ordered named fields     |
//! | `walk` | Stack-based pre-order traversal                 |
//! | `json` | Decoding PHP-Parser JSON dumps into the model   |
//!
//! Parsing source code is not done here; trees arrive from an external
//! parser as JSON dumps.

pub mod json;
pub mod node;
mod walk;

pub use json::read_dump;
pub use node::{NodeKind, SyntaxNode};
pub use walk::preorder;
