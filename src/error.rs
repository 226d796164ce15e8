//! Errors describing a tree whose structure has been corrupted.
//!
//! None of the tree operations fail during normal use: a lookup miss, a
//! duplicate insert and a delete of a missing value are all reported through
//! return values. An [`InvariantError`] means a bug in this crate, and the
//! trees panic with it when they detect one after a mutation.

use thiserror::Error;

use crate::node::NodeId;

/// A broken structural invariant, as found by
/// [`OrderedTree::validate`][crate::OrderedTree::validate] or
/// [`AvlTree::validate`][crate::AvlTree::validate].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// The root has a parent link.
    #[error("root {0:?} has a parent")]
    RootHasParent(NodeId),
    /// A child's parent link doesn't point at the node holding the child.
    #[error("{child:?} is a child of {parent:?} but its parent link is {found:?}")]
    BrokenParentLink {
        /// The node holding the child link.
        parent: NodeId,
        /// The node the child link points to.
        child: NodeId,
        /// Where the child's parent link actually points.
        found: Option<NodeId>,
    },
    /// In-order values aren't strictly increasing at this node.
    #[error("{0:?} is not greater than its in-order predecessor")]
    OutOfOrder(NodeId),
    /// A cached subtree height disagrees with the children's heights.
    #[error("{node:?} caches height {cached} but its children give {actual}")]
    StaleHeight {
        /// The offending node.
        node: NodeId,
        /// The height stored on the node.
        cached: usize,
        /// The height computed from its children.
        actual: usize,
    },
    /// The subtrees of this node differ in height by more than one.
    #[error("{node:?} has balance factor {balance}")]
    Unbalanced {
        /// The offending node.
        node: NodeId,
        /// Its left height minus its right height.
        balance: isize,
    },
    /// The recorded size disagrees with the number of reachable nodes.
    #[error("tree records {recorded} nodes but {reachable} are reachable")]
    SizeMismatch {
        /// The size the tree reports.
        recorded: usize,
        /// The number of nodes reachable from the root.
        reachable: usize,
    },
}

/// Panics with `error` after logging it. Used once a mutation has left the
/// tree in a state every later operation would trip over.
pub(crate) fn fatal(error: InvariantError) -> ! {
    log::error!("tree invariant violated: {error}");
    panic!("tree invariant violated: {error}")
}
