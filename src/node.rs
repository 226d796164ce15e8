//! Node storage shared by [`OrderedTree`][crate::OrderedTree] and
//! [`AvlTree`][crate::AvlTree].
//!
//! Nodes live in an [`Arena`] owned by the tree and refer to each other by
//! [`NodeId`]. A node's `left` and `right` links decide what is reachable from
//! the root; its `parent` link is only ever used to walk back up.

use std::fmt;
use std::mem;
use std::ptr;

/// A handle to a node of a tree.
///
/// A `NodeId` stays valid until the node it names is deleted. After that the
/// slot may be reused by a later insert, so holding on to a `NodeId` across a
/// `delete` of its value is a logic error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Which child link of a parent a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<T> Node<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A slab of nodes. Vacated slots are kept on a free list and handed out again
/// before the slab grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn alloc(&mut self, value: T, parent: Option<NodeId>) -> NodeId {
        let node = Node::new(value, parent);
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot of `id` and hands back its value. The caller must already
    /// have unlinked the node from the tree.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        let node = self.slots[id.0]
            .take()
            .expect("Releasing a node that was already released");
        self.free.push(id);
        node.value
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// ## Panics
    ///
    /// When `id` doesn't name a live node.
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{id:?} does not refer to a live node"),
        }
    }

    /// ## Panics
    ///
    /// When `id` doesn't name a live node.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("{id:?} does not refer to a live node"),
        }
    }

    /// Height of the subtree at `id`, where an absent subtree has height 0.
    pub(crate) fn height(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).height)
    }

    /// Height of the left subtree minus the height of the right subtree.
    pub(crate) fn balance_factor(&self, id: NodeId) -> isize {
        let node = self.node(id);
        self.height(node.left) as isize - self.height(node.right) as isize
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    /// Returns the new height.
    pub(crate) fn fix_height(&mut self, id: NodeId) -> usize {
        let node = self.node(id);
        let height = self.height(node.left).max(self.height(node.right)) + 1;
        self.node_mut(id).height = height;
        height
    }

    pub(crate) fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        match (head[low].as_mut(), tail[0].as_mut()) {
            (Some(x), Some(y)) => mem::swap(&mut x.value, &mut y.value),
            _ => panic!("Swapping values requires two live nodes"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

/// A read-only view of one node in a tree. It borrows the tree, so the node
/// can't be removed while the view exists.
///
/// Two `NodeRef`s compare equal when they are the same node of the same tree.
pub struct NodeRef<'a, T> {
    pub(crate) nodes: &'a Arena<T>,
    pub(crate) id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}
impl<T> Eq for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn node(&self) -> &'a Node<T> {
        self.nodes.node(self.id)
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.nodes, id))
    }

    /// The handle of this node, for passing to mutating tree methods.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// The node this one hangs from, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<Self> {
        self.at(self.node().left)
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<Self> {
        self.at(self.node().right)
    }

    /// The existing children in left-then-right order.
    ///
    /// ```
    /// use avl::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 8].into_iter().collect();
    /// let root = tree.root().unwrap();
    ///
    /// // There is no left child so only the right child is yielded.
    /// assert_eq!(root.children().map(|c| *c.value()).collect::<Vec<_>>(), [8]);
    /// ```
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, T>> {
        self.left().into_iter().chain(self.right())
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }

    /// The number of nodes on the longest path from this node down to a leaf.
    /// A leaf has a height of 1.
    pub fn height(&self) -> usize {
        self.node().height
    }

    /// The number of nodes on the path from the root down to this node. The
    /// root has a depth of 1.
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(*self), NodeRef::parent).count()
    }

    /// Height of the left subtree minus height of the right subtree. See [the
    /// Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance(&self) -> isize {
        self.nodes.balance_factor(self.id)
    }
}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("height", &self.height())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
