//! Benchmark tree construction and pruning on a synthetic sample set.

use capsample::tree::prune::prune;
use capsample::tree::SampleTree;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// Deterministic pseudo-random path generator; no rand dependency needed.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn synthetic_tree(samples: usize) -> SampleTree {
    let mut rng = Lcg(0x5eed);
    let mut tree = SampleTree::new();
    for _ in 0..samples {
        let depth = 2 + rng.next(4);
        let mut path = String::from("vol");
        for _ in 0..depth {
            path.push_str(&format!("/d{}", rng.next(12)));
        }
        path.push_str(&format!("/f{}", rng.next(1000)));
        tree.insert(&path, 1).expect("valid synthetic path");
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_10k_samples", |b| {
        b.iter(|| synthetic_tree(black_box(10_000)))
    });
}

fn bench_prune(c: &mut Criterion) {
    let tree = synthetic_tree(10_000);
    c.bench_function("prune_10k_to_30_leaves", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                prune(&mut tree, 30, 5).expect("prune succeeds");
                black_box(tree)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_insert, bench_prune);
criterion_main!(benches);
