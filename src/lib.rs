//! This crate exposes an ordered Binary Search Tree and its self-balancing
//! (AVL) specialization.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the value that
//! was inserted and will sometimes have child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! number of nodes on the longest path from the root `Node` to a leaf
//! `Node`). An [`OrderedTree`] makes no effort to keep that height small:
//! inserting ascending values builds a tree that is really a linked list.
//!
//! ## AVL Tree
//!
//! An [`AvlTree`] additionally keeps, for every `Node`, the heights of its
//! two subtrees within one of each other. After each insert or delete it walks
//! from the changed position up to the root and rotates any `Node` that became
//! unbalanced. This limits the height to `O(lg N)` where `N` is the number of
//! nodes in the tree.
//!
//! Both trees keep a parent link on every `Node` so the rebalancing walk (and
//! questions like "how deep is this node") can go upwards without recursion.
//!
//! ```
//! use avl::AvlTree;
//!
//! let tree: AvlTree<_> = [1, 4, 8].into_iter().collect();
//!
//! // Ascending inserts were rotated so that 4 is the root.
//! let root = tree.root().unwrap();
//! assert_eq!(root.value(), &4);
//! assert_eq!(root.children().map(|c| *c.value()).collect::<Vec<_>>(), [1, 8]);
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 4, 8]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
pub mod error;
pub mod node;
pub mod ordered;
pub mod traversal;

#[cfg(test)]
mod test;

pub use balanced::AvlTree;
pub use error::InvariantError;
pub use node::{NodeId, NodeRef};
pub use ordered::OrderedTree;
pub use traversal::{BreadthFirst, InOrder, PostOrder, PreOrder};
