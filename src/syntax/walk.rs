//! Pre-order traversal over syntax trees.
//!
//! Uses an explicit stack so deeply nested trees cannot overflow the
//! call stack.

use super::node::SyntaxNode;

/// Depth-first pre-order iterator over a forest of nodes.
///
/// Roots are yielded in order, each followed by its descendants in
/// declared field order.
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Preorder<'a> {
    pub fn new(roots: &'a [SyntaxNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is popped next
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Walk `roots` and every reachable node in pre-order.
pub fn preorder(roots: &[SyntaxNode]) -> Preorder<'_> {
    Preorder::new(roots)
}
