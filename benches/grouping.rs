//! Benchmarks for fragment grouping.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fractum::{ConnectivityGrouper, DisjointSet, Point2, Polygon};

/// A `cols` x `rows` grid of unit squares, every square sharing edges with
/// its neighbours.
fn tiling(cols: usize, rows: usize) -> Vec<Polygon<f64>> {
    let mut tiles = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            let (x, y) = (i as f64, j as f64);
            tiles.push(Polygon::new(vec![
                Point2::new(x, y),
                Point2::new(x + 1.0, y),
                Point2::new(x + 1.0, y + 1.0),
                Point2::new(x, y + 1.0),
            ]));
        }
    }
    tiles
}

fn bench_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    let grouper = ConnectivityGrouper::default();

    for side in [4, 16, 64] {
        let tiles = tiling(side, side);
        group.throughput(Throughput::Elements(tiles.len() as u64));

        group.bench_with_input(BenchmarkId::new("tiling", side), &tiles, |b, tiles| {
            b.iter(|| grouper.group_indices(black_box(tiles)))
        });
    }

    group.finish();
}

fn bench_disjoint_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_set");

    for n in [100, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("chain", n), &n, |b, &n| {
            b.iter(|| {
                let mut sets = DisjointSet::new(n);
                for i in 1..n {
                    sets.union(i - 1, i);
                }
                black_box(sets.find(0))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_group, bench_disjoint_set);
criterion_main!(benches);
