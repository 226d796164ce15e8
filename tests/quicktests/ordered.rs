use avl::{AvlTree, OrderedTree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    for op in &ops {
        match op {
            Op::Insert(x) => assert_eq!(tree.insert(*x), set.insert(*x)),
            Op::Delete(x) => assert_eq!(tree.delete(x), set.take(x)),
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    tree.size() == set.len() && tree.in_order().eq(set.iter())
}

/// Re-inserting a BST's pre-order traversal rebuilds exactly the same tree.
#[quickcheck]
fn pre_order_rebuilds_same_shape(xs: Vec<i16>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();
    let rebuilt: OrderedTree<_> = tree.pre_order().copied().collect();

    tree.pre_order().eq(rebuilt.pre_order()) && tree.breadth_first().eq(rebuilt.breadth_first())
}

/// Both trees hold the same values after the same operations, only their
/// shapes differ.
#[quickcheck]
fn agrees_with_avl_tree(ops: Vec<Op<i8>>) -> bool {
    let mut ordered = OrderedTree::new();
    let mut balanced = AvlTree::new();

    for op in &ops {
        match op {
            Op::Insert(x) => assert_eq!(ordered.insert(*x), balanced.insert(*x)),
            Op::Delete(x) => assert_eq!(ordered.delete(x), balanced.delete(x)),
        }
    }

    ordered.size() == balanced.size() && ordered.in_order().eq(balanced.in_order())
}

#[quickcheck]
fn balance_is_height_difference(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();

    tree.in_order().all(|value| {
        let node = tree.search(value).unwrap();
        let left = node.left().map_or(0, |n| n.height()) as isize;
        let right = node.right().map_or(0, |n| n.height()) as isize;
        tree.balance_of(Some(node)) == left - right
    })
}
