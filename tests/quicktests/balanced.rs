use avl::AvlTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values in both, and that the tree
/// never lost its balance on the way.
fn do_ops<T>(ops: &[Op<T>], tree: &mut AvlTree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(x) => assert_eq!(tree.insert(x.clone()), set.insert(x.clone())),
            Op::Delete(x) => assert_eq!(tree.delete(x), set.take(x)),
        }
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.size(), set.len());
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i16(ops: Vec<Op<i16>>) -> bool {
    init_logging();
    let mut tree = AvlTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.in_order().eq(set.iter())
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x) && tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
        assert_eq!(tree.validate(), Ok(()));
    }

    let still_present: HashSet<_> = xs
        .iter()
        .filter(|x| !deletes.contains(x))
        .collect();

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.size() == still_present.len()
}

#[quickcheck]
fn delete_down_to_empty(xs: Vec<u8>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();
    let values: Vec<_> = tree.pre_order().copied().collect();

    for value in &values {
        assert_eq!(tree.delete(value), Some(*value));
        assert_eq!(tree.validate(), Ok(()));
    }
    tree.is_empty() && tree.root().is_none()
}

fn sorted<'a>(iter: impl Iterator<Item = &'a i8>) -> Vec<i8> {
    let mut values: Vec<_> = iter.copied().collect();
    values.sort_unstable();
    values
}

#[quickcheck]
fn every_traversal_visits_every_value(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let in_order: Vec<_> = tree.in_order().copied().collect();

    in_order.windows(2).all(|w| w[0] < w[1])
        && sorted(tree.pre_order()) == in_order
        && sorted(tree.post_order()) == in_order
        && sorted(tree.breadth_first()) == in_order
}

#[quickcheck]
fn parent_links_point_back(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    tree.in_order().all(|value| {
        let node = tree.search(value).unwrap();
        node.children().all(|child| child.parent() == Some(node))
            && node.depth() == tree.depth_of(Some(node))
            && node.depth() <= tree.depth()
    })
}
