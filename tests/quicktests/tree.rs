use linked_bst::{Error, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and erases we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Erase(k) => {
                bst.erase(k);
                set.remove(k);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn iteration_is_strictly_ascending(ops: Vec<Op<i16>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    let keys: Vec<_> = tree.iter().collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn insert_twice(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.into_iter().filter(|&k| k != x).collect();
    let before = tree.len();

    tree.insert(x) && !tree.insert(x) && tree.len() == before + 1
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.erase(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn erase_removes_exactly_one(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    tree.insert(x);
    let before = tree.len();

    tree.erase(&x) && tree.len() == before - 1 && !tree.contains(&x) && !tree.erase(&x)
}

#[quickcheck]
fn round_trip_is_sorted(xs: HashSet<i16>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted: Vec<_> = xs.into_iter().collect();
    sorted.sort_unstable();

    tree.iter().copied().eq(sorted)
}

#[quickcheck]
fn only_erased_cursors_go_stale(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let cursors: Vec<_> = xs.iter().map(|x| (*x, tree.find(x).unwrap())).collect();

    for delete in &deletes {
        tree.erase(delete);
    }

    cursors.iter().all(|(key, cursor)| {
        if deletes.contains(key) {
            cursor.key(&tree) == Err(Error::Stale)
        } else {
            cursor.key(&tree) == Ok(key)
        }
    })
}

#[test]
fn scenario_erase_two_children() {
    let mut tree = Tree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        assert!(tree.insert(key));
    }
    assert!(tree.iter().copied().eq([1, 3, 4, 5, 7, 8, 9]));

    tree.erase(&5);

    assert!(tree.iter().copied().eq([1, 3, 4, 7, 8, 9]));
    assert!(!tree.contains(&5));
    assert!(tree.contains(&7));
}

#[test]
fn scenario_erase_lone_root() {
    let mut tree = Tree::new();
    tree.insert(5);

    tree.erase(&5);

    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
}
