//! Contracts of the sample tree: weight conservation, per-node invariants,
//! pruning bounds, termination, and rendering determinism.

use capsample::tree::prune::prune;
use capsample::tree::render::render;
use capsample::tree::{NodeId, SampleTree};
use proptest::prelude::*;

/// Assert `subtree_weight == own_weight + sum(children)` for every node
/// reachable from the root.
fn assert_weight_invariant(tree: &SampleTree) {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let child_sum: u64 = tree.children(id).map(|c| tree.subtree_weight(c)).sum();
        assert_eq!(
            tree.subtree_weight(id),
            tree.own_weight(id) + child_sum,
            "invariant violated at node {:?}",
            tree.name(id)
        );
        stack.extend(tree.children(id));
    }
}

fn node_at(tree: &SampleTree, path: &str) -> NodeId {
    let mut current = tree.root();
    for component in path.split('/') {
        current = tree
            .children(current)
            .find(|&child| tree.name(child) == component)
            .unwrap_or_else(|| panic!("missing component {:?}", component));
    }
    current
}

#[test]
fn insertions_conserve_weight_and_structure() {
    let mut tree = SampleTree::new();
    tree.insert("a/b/c", 1).unwrap();
    tree.insert("a/b/d", 1).unwrap();
    tree.insert("a/e", 1).unwrap();

    assert_eq!(tree.total_weight(), 3);
    assert_eq!(tree.subtree_weight(node_at(&tree, "a")), 3);
    assert_eq!(tree.subtree_weight(node_at(&tree, "a/b")), 2);
    for leaf in tree.leaves() {
        assert_eq!(tree.own_weight(leaf), 1);
    }
    assert_weight_invariant(&tree);
}

#[test]
fn merges_conserve_root_weight() {
    let mut tree = SampleTree::new();
    tree.insert("a/b/c", 2).unwrap();
    tree.insert("a/b/d", 3).unwrap();
    tree.insert("x", 5).unwrap();

    let c = node_at(&tree, "a/b/c");
    let b = tree.merge_up(c).unwrap();
    assert_weight_invariant(&tree);
    assert_eq!(tree.total_weight(), 10);

    let d = node_at(&tree, "a/b/d");
    tree.merge_up(d).unwrap();
    tree.merge_up(b).unwrap();
    assert_weight_invariant(&tree);
    assert_eq!(tree.total_weight(), 10);
}

#[test]
fn prune_to_two_leaves_merges_exactly_one() {
    let mut tree = SampleTree::new();
    tree.insert("a/b/c", 1).unwrap();
    tree.insert("a/b/d", 1).unwrap();
    tree.insert("a/e", 1).unwrap();

    prune(&mut tree, 2, 0).unwrap();

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.total_weight(), 3);
    assert_eq!(tree.own_weight(node_at(&tree, "a/b")), 1);
    assert_weight_invariant(&tree);
}

#[test]
fn high_threshold_collapses_everything_to_root() {
    let mut tree = SampleTree::new();
    tree.insert("a/b/c", 1).unwrap();
    tree.insert("a/b/d", 1).unwrap();
    tree.insert("a/e", 1).unwrap();

    prune(&mut tree, 10, 5).unwrap();

    assert!(tree.is_leaf(tree.root()));
    assert_eq!(tree.own_weight(tree.root()), 3);
    assert_eq!(tree.total_weight(), 3);
}

#[test]
fn repruning_with_same_constraints_changes_nothing() {
    let mut tree = SampleTree::new();
    for (path, weight) in [
        ("srv/data/logs/app.log", 7),
        ("srv/data/db/main.db", 9),
        ("srv/data/tmp/x", 1),
        ("home/u1/big.bin", 12),
        ("home/u2/small", 2),
    ] {
        tree.insert(path, weight).unwrap();
    }

    prune(&mut tree, 3, 2).unwrap();
    let first = render(&tree, "", |value| value.to_string());
    let first_leaves = tree.leaf_count();

    prune(&mut tree, 3, 2).unwrap();
    assert_eq!(render(&tree, "", |value| value.to_string()), first);
    assert_eq!(tree.leaf_count(), first_leaves);

    // Looser constraints are also a no-op on an already-satisfied tree.
    prune(&mut tree, 10, 0).unwrap();
    assert_eq!(render(&tree, "", |value| value.to_string()), first);
}

proptest! {
    /// Root subtree weight equals the sum of all inserted weights, before
    /// and after pruning.
    #[test]
    fn weight_is_conserved(
        entries in prop::collection::vec(
            ("[a-c](/[a-c]){0,3}", 1..5u64),
            1..40,
        ),
        max_leaves in 1..8usize,
        min_weight in 0..4u64,
    ) {
        let mut tree = SampleTree::new();
        let mut total = 0u64;
        for (path, weight) in &entries {
            tree.insert(path, *weight).unwrap();
            total += weight;
        }
        prop_assert_eq!(tree.total_weight(), total);
        assert_weight_invariant(&tree);

        let initial_leaves = tree.leaf_count();
        prune(&mut tree, max_leaves, min_weight).unwrap();

        prop_assert_eq!(tree.total_weight(), total);
        assert_weight_invariant(&tree);

        // Pruning bound: budget met, or every leaf is significant, or the
        // tree collapsed to the root.
        let leaves: Vec<_> = tree.leaves().collect();
        let bounded = leaves.len() <= max_leaves;
        let all_significant = leaves.iter().all(|&l| tree.own_weight(l) > min_weight);
        let root_only = leaves.len() == 1 && leaves[0] == tree.root();
        prop_assert!(bounded || all_significant || root_only);

        // Termination implies monotone shrinkage.
        prop_assert!(tree.leaf_count() <= initial_leaves);
    }

    /// Pruning twice with the same constraints is idempotent.
    #[test]
    fn pruning_is_idempotent(
        entries in prop::collection::vec(
            ("[a-d](/[a-d]){0,2}", 1..6u64),
            1..30,
        ),
        max_leaves in 1..6usize,
        min_weight in 0..5u64,
    ) {
        let mut tree = SampleTree::new();
        for (path, weight) in &entries {
            tree.insert(path, *weight).unwrap();
        }
        prune(&mut tree, max_leaves, min_weight).unwrap();
        let once = render(&tree, "", |value| value.to_string());
        prune(&mut tree, max_leaves, min_weight).unwrap();
        prop_assert_eq!(render(&tree, "", |value| value.to_string()), once);
    }
}
