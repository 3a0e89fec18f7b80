//! Tree traversal and in-place rewriting.
//!
//! # Visiting
//!
//! [`Node::visit`] walks the tree in pre-order: a node, then its children left
//! to right. A function's callee is visited right after the function and
//! before its arguments. Every node is visited exactly once and the walk
//! cannot be cut short.
//!
//! # Transforming
//!
//! [`Node::transform`] hands every node to a callback that answers with a
//! [`Transformed`]:
//!
//! - [`Transformed::Unchanged`] keeps the node and descends into its children,
//!   rewriting each one in place.
//! - [`Transformed::Replaced`] swaps the node out and stops there. The old
//!   node's children are never offered to the callback, and neither is the
//!   replacement, even when it is structurally equal to the original.
//!
//! ```
//! use mathexpr::{Node, Transformed, parse};
//!
//! let tree = parse("x + f(x)").unwrap();
//! let tree = tree.transform(|node| match node {
//!     Node::Symbol(s) if s.name == "x" => Transformed::Replaced(Node::float(2.0)),
//!     _ => Transformed::Unchanged,
//! });
//! assert_eq!(tree.to_string(), "2 + f(2)");
//! ```

use crate::ast::Node;

/// Answer of a transform callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    /// Keep the node and keep descending
    Unchanged,

    /// Put this node in place of the visited one and do not descend
    Replaced(Node),
}

impl Transformed {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Transformed::Replaced(_))
    }
}

impl From<Option<Node>> for Transformed {
    fn from(node: Option<Node>) -> Self {
        match node {
            Some(node) => Transformed::Replaced(node),
            None => Transformed::Unchanged,
        }
    }
}

impl Node {
    /// Pre-order walk over every node of the tree.
    ///
    /// The callee of a [`Node::Function`] is passed as a `Node::Symbol`.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&Node),
    {
        self.visit_with(&mut visitor);
    }

    fn visit_with<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node),
    {
        visitor(self);

        if let Node::Function(call) = self {
            visitor(&Node::Symbol(call.callee.clone()));
        }

        for child in self.children() {
            child.visit_with(visitor);
        }
    }

    /// Rewrites the tree, returning the new root.
    pub fn transform<F>(mut self, mut f: F) -> Node
    where
        F: FnMut(&Node) -> Transformed,
    {
        self.transform_in_place(&mut f);
        self
    }

    /// Same as [`Node::transform`], rewriting through a mutable reference.
    pub fn transform_in_place<F>(&mut self, f: &mut F)
    where
        F: FnMut(&Node) -> Transformed,
    {
        match f(self) {
            Transformed::Replaced(replacement) => *self = replacement,
            Transformed::Unchanged => {
                for child in self.children_mut() {
                    child.transform_in_place(f);
                }
            }
        }
    }

    /// Number of nodes in the tree, callees included.
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }
}
