// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use arbor_core::utils::index::VertexIndex;
use arbor_tree::{
    graph::Tree,
    operators::{DistanceSumOperator, EccentricityOperator},
    rerooting::Rerooting,
    tree_dp::TreeDp,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Random recursive tree: vertex `i` hangs below a uniform vertex in `0..i`.
fn random_tree(n: usize, seed: u64) -> Tree<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Tree::from_undirected_edges(
        n,
        (1..n).map(|i| (rng.gen_range(0..i), i, rng.gen_range(1..100))),
    )
}

fn path(n: usize) -> Tree<i64> {
    Tree::from_undirected_edges(n, (1..n).map(|i| (i - 1, i, 1)))
}

fn bench_rerooting(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerooting");

    for &n in SIZES.iter() {
        group.throughput(Throughput::Elements(n as u64));

        let tree = random_tree(n, 0xA5B0);
        let mut dp = Rerooting::from_tree(tree.clone(), DistanceSumOperator::<i64>::new());
        group.bench_with_input(BenchmarkId::new("distance_sum/random", n), &n, |b, _| {
            b.iter(|| {
                dp.build(VertexIndex::new(0));
                black_box(dp.answers().len())
            })
        });

        let mut dp = Rerooting::from_tree(path(n), EccentricityOperator::<i64>::new());
        group.bench_with_input(BenchmarkId::new("eccentricity/path", n), &n, |b, _| {
            b.iter(|| {
                dp.build(VertexIndex::new(0));
                black_box(dp.answers().len())
            })
        });

        let mut single = TreeDp::from_tree(tree, DistanceSumOperator::<i64>::new());
        group.bench_with_input(BenchmarkId::new("tree_dp/random", n), &n, |b, _| {
            b.iter(|| {
                single.build(VertexIndex::new(0));
                black_box(single.values().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rerooting);
criterion_main!(benches);
