//! Lazy traversals over a tree's values.
//!
//! Every traversal keeps its own explicit stack (or queue, for
//! [`BreadthFirst`]) of nodes still to visit, so asking a tree for a traversal
//! twice gives two independent walks from the root.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::{Arena, NodeId};

/// Yields values in sorted order: left subtree, node, right subtree.
pub struct InOrder<'a, T> {
    nodes: &'a Arena<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.nodes.node(id).left;
        }
    }

    pub(crate) fn next_id(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.nodes.node(id).right);
        Some(id)
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes.node(id).value)
    }
}

impl<T> FusedIterator for InOrder<'_, T> {}

/// Yields each node's value before the values of its left and then right
/// subtrees.
pub struct PreOrder<'a, T> {
    nodes: &'a Arena<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.nodes.node(id);
        // Right first so the left subtree is popped first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(id)
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes.node(id).value)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

/// Yields the values of each node's left and then right subtrees before the
/// node's own value.
pub struct PostOrder<'a, T> {
    nodes: &'a Arena<T>,
    /// Nodes to visit, flagged with whether their children were already
    /// pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: root.map(|id| (id, false)).into_iter().collect(),
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded {
                return Some(id);
            }
            let node = self.nodes.node(id);
            self.stack.push((id, true));
            self.stack.extend(node.right.map(|r| (r, false)));
            self.stack.extend(node.left.map(|l| (l, false)));
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes.node(id).value)
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

/// Yields values level by level from the root, left to right within a level.
pub struct BreadthFirst<'a, T> {
    nodes: &'a Arena<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T> BreadthFirst<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.node(self.queue.pop_front()?);
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.value)
    }
}

impl<T> FusedIterator for BreadthFirst<'_, T> {}
