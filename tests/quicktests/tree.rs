use avl::Tree;
use quickcheck::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// The tallest an AVL tree with `len` keys is allowed to get.
fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 2) as f64).log2()
}

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                tree.delete(k);
                set.remove(k);
            }
        }
    }
}

quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.iter().eq(set.iter()) && tree.len() == set.len()
    }

    fn every_operation_keeps_the_tree_valid(ops: Vec<Op<i16>>) -> bool {
        let mut tree = Tree::new();

        ops.iter().all(|op| {
            match op {
                Op::Insert(k) => tree.insert(*k),
                Op::Delete(k) => tree.delete(k),
            };
            tree.validate().is_ok() && (tree.height() as f64) <= height_bound(tree.len())
        })
    }

    fn traversal_is_sorted_distinct_keys(xs: Vec<i32>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let expected: BTreeSet<_> = xs.into_iter().collect();

        tree.iter().eq(expected.iter())
    }

    fn duplicate_insert_changes_nothing(xs: Vec<u8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before = tree.sideways().to_string();

        xs.iter().all(|x| !tree.insert(*x)) && tree.sideways().to_string() == before
    }

    fn delete_miss_changes_nothing(xs: Vec<u8>, misses: Vec<u8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before = tree.sideways().to_string();
        let present: HashSet<_> = xs.into_iter().collect();

        misses
            .iter()
            .filter(|x| !present.contains(*x))
            .all(|x| !tree.delete(x))
            && tree.sideways().to_string() == before
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.delete(delete);
        }

        let deleted: HashSet<_> = deletes.iter().collect();
        deletes.iter().all(|x| !tree.contains(x))
            && xs.iter().filter(|x| !deleted.contains(x)).all(|x| tree.contains(x))
    }

    fn draining_from_the_root_stays_valid(xs: Vec<i16>) -> bool {
        let mut tree: Tree<_> = xs.into_iter().collect();

        while let Some(root) = tree.root().map(|root| *root.key()) {
            if !tree.delete(&root) || tree.validate().is_err() {
                return false;
            }
        }
        tree.is_empty() && tree.len() == 0
    }
}
