//! A plain ordered BST. It keeps values sorted but never rebalances, so its
//! shape depends entirely on insertion order.
//!
//! # Examples
//!
//! ```
//! use avl::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same value again does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert!(!tree.contains(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{self, InvariantError};
use crate::node::{Arena, NodeId, NodeRef, Side};
use crate::traversal::{BreadthFirst, InOrder, PostOrder, PreOrder};

/// A Binary Search Tree of unique values without any rebalancing.
#[derive(Clone)]
pub struct OrderedTree<T> {
    pub(crate) nodes: Arena<T>,
    pub(crate) root: Option<NodeId>,
    size: usize,
}

/// What [`OrderedTree::remove`] physically took out of the tree.
pub(crate) struct Removal<T> {
    pub(crate) value: T,
    /// The parent of the unlinked node. Every subtree height that could have
    /// changed is on the path from here to the root.
    pub(crate) parent: Option<NodeId>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("size", &self.size)
            .field("root", &self.root())
            .finish()
    }
}

impl<T> OrderedTree<T> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            root: None,
            size: 0,
        }
    }

    /// The number of values in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// The node named by `id`, if it is still in the tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.nodes.get(id).map(|_| NodeRef::new(&self.nodes, id))
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has a depth of 0 and a lone root has a depth of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// // Ascending inserts make a tree that leans all the way right.
    /// assert_eq!(tree.depth(), 3);
    /// ```
    pub fn depth(&self) -> usize {
        self.nodes.height(self.root)
    }

    /// The number of nodes on the path from the root to `node`, counting both.
    /// An absent node has a depth of 0.
    pub fn depth_of(&self, node: Option<NodeRef<'_, T>>) -> usize {
        node.map_or(0, |n| n.depth())
    }

    /// The balance factor of the root. See [`OrderedTree::balance_of`].
    pub fn balance(&self) -> isize {
        self.balance_of(self.root())
    }

    /// Height of the left subtree of `node` minus the height of its right
    /// subtree. An absent node has a balance of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [50, 40, 30, 20, 10, 60].into_iter().collect();
    ///
    /// assert_eq!(tree.balance(), 3);
    /// assert_eq!(tree.balance_of(tree.search(&60)), 0);
    /// assert_eq!(tree.balance_of(tree.search(&42)), 0);
    /// ```
    pub fn balance_of(&self, node: Option<NodeRef<'_, T>>) -> isize {
        node.map_or(0, |n| n.balance())
    }

    /// Visits values in sorted order.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(&self.nodes, self.root)
    }

    /// Visits each node before its left subtree and then its right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.nodes, self.root)
    }

    /// Visits each node after its left subtree and then its right subtree.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(&self.nodes, self.root)
    }

    /// Visits nodes level by level, left to right.
    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst::new(&self.nodes, self.root)
    }

    /// Same as [`OrderedTree::in_order`].
    pub fn iter(&self) -> InOrder<'_, T> {
        self.in_order()
    }

    /// Drops every value in the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// Potentially finds the node holding `value`. If no node has it, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let one = tree.search(&1).unwrap();
    /// assert!(one.is_leaf());
    /// assert_eq!(one.parent(), tree.root());
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, value: &T) -> Option<NodeRef<'_, T>>
    where
        T: Ord,
    {
        self.find(value).map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Whether a node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// Inserts `value` as a new leaf. Returns `false`, leaving the tree
    /// untouched, if the value is already present.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = self.attach(value).is_some();
        self.check_invariants();
        inserted
    }

    /// Deletes the node holding `value` and returns the value. If the tree
    /// doesn't contain it, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [5, 3, 8, 7, 9].into_iter().collect();
    ///
    /// // 8 has two children so its successor 9 takes its place.
    /// assert_eq!(tree.delete(&8), Some(8));
    /// assert_eq!(tree.search(&9).unwrap().parent().unwrap().value(), &5);
    /// assert_eq!(tree.delete(&8), None);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let removed = self.remove(value).map(|removal| removal.value);
        self.check_invariants();
        removed
    }

    /// Checks every structural invariant: parent links, strict ordering,
    /// cached heights and the size count.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (0..100).rev().collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        if let Some(root) = self.root {
            if self.nodes.node(root).parent.is_some() {
                return Err(InvariantError::RootHasParent(root));
            }
        }

        let mut reachable = 0;
        let mut previous: Option<&T> = None;
        for id in self.node_ids() {
            reachable += 1;
            let node = self.nodes.node(id);

            if previous.is_some_and(|previous| *previous >= node.value) {
                return Err(InvariantError::OutOfOrder(id));
            }
            previous = Some(&node.value);

            for child in [node.left, node.right].into_iter().flatten() {
                let found = self.nodes.node(child).parent;
                if found != Some(id) {
                    return Err(InvariantError::BrokenParentLink {
                        parent: id,
                        child,
                        found,
                    });
                }
            }

            let actual = self.nodes.height(node.left).max(self.nodes.height(node.right)) + 1;
            if node.height != actual {
                return Err(InvariantError::StaleHeight {
                    node: id,
                    cached: node.height,
                    actual,
                });
            }
        }

        if reachable != self.size {
            return Err(InvariantError::SizeMismatch {
                recorded: self.size,
                reachable,
            });
        }
        Ok(())
    }

    /// Every node id in sorted order of their values.
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut walk = InOrder::new(&self.nodes, self.root);
        std::iter::from_fn(move || walk.next_id())
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.node(id).parent
    }

    fn find(&self, value: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.node(id);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Descends from the root and hangs a new leaf holding `value` where the
    /// descent falls off the tree. Returns `None` without touching anything if
    /// `value` is already present.
    pub(crate) fn attach(&mut self, value: T) -> Option<NodeId>
    where
        T: Ord,
    {
        let Some(mut current) = self.root else {
            let id = self.nodes.alloc(value, None);
            self.root = Some(id);
            self.size += 1;
            return Some(id);
        };

        let id = loop {
            let node = self.nodes.node(current);
            let side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return None,
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let id = self.nodes.alloc(value, Some(current));
                    *self.nodes.node_mut(current).child_mut(side) = Some(id);
                    break id;
                }
            }
        };

        if cfg!(debug_assertions) {
            let parent = self.nodes.node(current);
            match parent.left {
                Some(left) if left == id => assert!(self.nodes.node(id).value < parent.value),
                _ => assert!(self.nodes.node(id).value > parent.value),
            }
        }

        self.size += 1;
        self.fix_heights_from(Some(current));
        Some(id)
    }

    /// Unlinks the node holding `value` and frees it.
    ///
    /// A node with two children isn't unlinked itself: it takes the value of
    /// its in-order successor (the leftmost node of its right subtree) and the
    /// successor, which has no left child, is unlinked instead.
    pub(crate) fn remove(&mut self, value: &T) -> Option<Removal<T>>
    where
        T: Ord,
    {
        let target = self.find(value)?;
        let node = self.nodes.node(target);
        let doomed = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                self.nodes.swap_values(target, successor);
                successor
            }
            _ => target,
        };

        let node = self.nodes.node(doomed);
        let (parent, child) = (node.parent, node.left.or(node.right));
        if let Some(child) = child {
            self.nodes.node_mut(child).parent = parent;
        }
        self.replace_child(parent, doomed, child);

        let value = self.nodes.release(doomed);
        self.size -= 1;
        self.fix_heights_from(parent);
        Some(Removal { value, parent })
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes.node(id).left {
            id = left;
        }
        id
    }

    /// Points whichever link held `old` (a child link of `parent`, or the
    /// root) at `new` instead. Doesn't touch `new`'s parent link.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        let Some(parent) = parent else {
            self.root = new;
            return;
        };
        let parent = self.nodes.node_mut(parent);
        if parent.left == Some(old) {
            parent.left = new;
        } else {
            debug_assert_eq!(parent.right, Some(old), "{old:?} is not a child of its parent");
            parent.right = new;
        }
    }

    /// Recomputes cached heights from `next` up to the root.
    pub(crate) fn fix_heights_from(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            self.nodes.fix_height(id);
            next = self.nodes.node(id).parent;
        }
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

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    /// Inserts the values one at a time, in order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> From<T> for OrderedTree<T>
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

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}
