//! A self-balancing BST (specifically, an AVL tree). Every read-only query of
//! [`OrderedTree`] is available through `Deref`; `insert` and `delete` are
//! intercepted so that every mutation is followed by a rebalancing walk.
//!
//! # Examples
//!
//! ```
//! use avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Ascending inserts would make a plain BST as tall as it is long.
//! for x in 0..1023 {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.depth(), 10);
//! assert!(tree.contains(&512));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&512), Some(512));
//! assert_eq!(tree.delete(&512), None);
//! assert_eq!(tree.size(), 1022);
//! ```

use std::fmt;
use std::ops::Deref;

use crate::error::{self, InvariantError};
use crate::node::{NodeId, NodeRef};
use crate::ordered::OrderedTree;
use crate::traversal::InOrder;

/// A Binary Search Tree of unique values that keeps, for every node, the
/// heights of its two subtrees within one of each other.
#[derive(Clone)]
pub struct AvlTree<T> {
    tree: OrderedTree<T>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("size", &self.size())
            .field("root", &self.root())
            .finish()
    }
}

/// Only shared access is handed out: mutating the inner tree directly would
/// skip the rebalancing walk.
impl<T> Deref for AvlTree<T> {
    type Target = OrderedTree<T>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<T> AvlTree<T> {
    /// Generate a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    /// Gives up balancing and returns the tree as it currently stands.
    pub fn into_inner(self) -> OrderedTree<T> {
        self.tree
    }

    /// Drops every value in the tree.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts `value`, then rotates any ancestor of the new node that ended up
    /// unbalanced. Returns `false`, leaving the tree untouched, if the value is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(8));
    /// assert!(tree.insert(4));
    /// assert!(!tree.insert(8));
    ///
    /// // The third insert makes the root left-heavy so it gets rotated right.
    /// assert!(tree.insert(1));
    /// assert_eq!(tree.root().unwrap().value(), &4);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let Some(id) = self.tree.attach(value) else {
            return false;
        };
        self.retrace(self.tree.parent_of(id));
        self.check_invariants();
        true
    }

    /// Deletes the node holding `value` and returns the value, then rotates any
    /// ancestor of the physically removed node that ended up unbalanced. If the
    /// tree doesn't contain the value, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = [2, 1, 3, 4].into_iter().collect();
    ///
    /// // Losing 1 leaves the root two levels shorter on the left.
    /// assert_eq!(tree.delete(&1), Some(1));
    /// assert_eq!(tree.root().unwrap().value(), &3);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let removal = self.tree.remove(value)?;
        self.retrace(removal.parent);
        self.check_invariants();
        Some(removal.value)
    }

    /// Walks from `start` up through its ancestors and returns the first node
    /// whose subtrees differ in height by more than one. `start` itself is the
    /// first node checked.
    ///
    /// ## Panics
    ///
    /// When `start` doesn't name a node in this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let tree: AvlTree<_> = (0..100).collect();
    ///
    /// for value in tree.in_order() {
    ///     let node = tree.search(value).unwrap();
    ///     assert!(tree.check_balance(node.id()).is_none());
    /// }
    /// ```
    pub fn check_balance(&self, start: NodeId) -> Option<NodeRef<'_, T>> {
        self.first_unbalanced(Some(start))
            .map(|id| NodeRef::new(&self.tree.nodes, id))
    }

    /// Rotates the subtree rooted at `node` so it is balanced again and returns
    /// the new subtree root. A node whose balance factor is within ±1 is left
    /// alone and returned as is.
    ///
    /// The rotation is picked from the sign of `node`'s balance factor and the
    /// sign of its taller child's balance factor. See [the Wikipedia
    /// page][wiki] for the four cases.
    ///
    /// ## Panics
    ///
    /// When `node` doesn't name a node in this tree.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
    pub fn rebalance(&mut self, node: NodeId) -> NodeId {
        let nodes = &self.tree.nodes;
        let balance = nodes.balance_factor(node);
        let pivot = match balance {
            2.. => {
                let left = nodes.node(node).left.expect("Left-heavy => left child");
                if nodes.balance_factor(left) >= 0 {
                    self.rotate_right(node)
                } else {
                    self.rotate_left_right(node)
                }
            }
            ..=-2 => {
                let right = nodes.node(node).right.expect("Right-heavy => right child");
                if nodes.balance_factor(right) <= 0 {
                    self.rotate_left(node)
                } else {
                    self.rotate_right_left(node)
                }
            }
            _ => return node,
        };
        log::debug!("rebalanced {node:?} (balance factor {balance}) into {pivot:?}");

        // Every ancestor's height may have dropped back by one.
        self.tree.fix_heights_from(self.tree.parent_of(pivot));

        if cfg!(debug_assertions) {
            let nodes = &self.tree.nodes;
            let root = nodes.node(pivot);
            let left_height = nodes.height(root.left);
            let right_height = nodes.height(root.right);
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        pivot
    }

    /// Checks everything [`OrderedTree::validate`] does plus the AVL property:
    /// no node's subtrees differ in height by more than one.
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        self.tree.validate()?;
        for id in self.tree.node_ids() {
            let balance = self.tree.nodes.balance_factor(id);
            if balance.abs() > 1 {
                return Err(InvariantError::Unbalanced { node: id, balance });
            }
        }
        Ok(())
    }

    fn first_unbalanced(&self, mut next: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = next {
            if self.tree.nodes.balance_factor(id).abs() > 1 {
                return Some(id);
            }
            next = self.tree.parent_of(id);
        }
        None
    }

    /// Rebalances every unbalanced node from `start` up to the root. A rotation
    /// changes the heights above it so the search resumes from the new subtree
    /// root's parent rather than stopping at the first fix.
    fn retrace(&mut self, mut start: Option<NodeId>) {
        while let Some(unbalanced) = self.first_unbalanced(start) {
            let pivot = self.rebalance(unbalanced);
            start = self.tree.parent_of(pivot);
        }
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically
    /// and `old_root` down vertically. Used to rebalance the tree when the left
    /// child is too tall. Returns the new subtree root.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// Roughly speaking, we want to perform this transformation:
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///   old_root                  new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(&mut self, old_root: NodeId) -> NodeId {
        let nodes = &mut self.tree.nodes;
        let parent = nodes.node(old_root).parent;
        let new_root = nodes.node(old_root).left.expect("Rotate right => left child");
        let inner = nodes.node(new_root).right;

        nodes.node_mut(old_root).left = inner;
        if let Some(inner) = inner {
            nodes.node_mut(inner).parent = Some(old_root);
        }
        nodes.node_mut(old_root).parent = Some(new_root);
        nodes.node_mut(new_root).right = Some(old_root);
        nodes.node_mut(new_root).parent = parent;

        // NB `old_root` is now below `new_root` so its height has to be fixed first.
        nodes.fix_height(old_root);
        nodes.fix_height(new_root);
        self.tree.replace_child(parent, old_root, Some(new_root));

        log::trace!("rotated {old_root:?} right, {new_root:?} took its place");
        new_root
    }

    /// The mirror image of [`AvlTree::rotate_right`].
    fn rotate_left(&mut self, old_root: NodeId) -> NodeId {
        let nodes = &mut self.tree.nodes;
        let parent = nodes.node(old_root).parent;
        let new_root = nodes.node(old_root).right.expect("Rotate left => right child");
        let inner = nodes.node(new_root).left;

        nodes.node_mut(old_root).right = inner;
        if let Some(inner) = inner {
            nodes.node_mut(inner).parent = Some(old_root);
        }
        nodes.node_mut(old_root).parent = Some(new_root);
        nodes.node_mut(new_root).left = Some(old_root);
        nodes.node_mut(new_root).parent = parent;

        nodes.fix_height(old_root);
        nodes.fix_height(new_root);
        self.tree.replace_child(parent, old_root, Some(new_root));

        log::trace!("rotated {old_root:?} left, {new_root:?} took its place");
        new_root
    }

    fn rotate_left_right(&mut self, old_root: NodeId) -> NodeId {
        let left = self.tree.nodes.node(old_root).left.expect("Rotate left-right => left child");
        self.rotate_left(left);
        self.rotate_right(old_root)
    }

    fn rotate_right_left(&mut self, old_root: NodeId) -> NodeId {
        let right = self.tree.nodes.node(old_root).right.expect("Rotate right-left => right child");
        self.rotate_right(right);
        self.rotate_left(old_root)
    }

    fn check_invariants(&self)
    where
        T: Ord,
    {
        if cfg!(feature = "check-invariants") {
            if let Err(e) = self.validate() {
                error::fatal(e);
            }
        }
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    /// Inserts the values one at a time, in order, rebalancing after each.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> From<T> for AvlTree<T>
where
    T: Ord,
{
    /// A tree with `value` at its root.
    fn from(value: T) -> Self {
        let mut tree = Self::new();
        tree.insert(value);
        tree
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}
