use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdthree::KdTree;

const SIZES: [usize; 4] = [100, 1000, 10_000, 100_000];

fn benchmark_random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.sample_size(10);

    for &size in &SIZES {
        group.bench_with_input(BenchmarkId::new("random", size), &size, |b, &s| {
            b.iter(|| {
                let mut tree = KdTree::new();
                black_box(tree.random_points_seeded(s, 123456789));
            })
        });
    }
    group.finish();
}

fn benchmark_layout(c: &mut Criterion) {
    let mut tree = KdTree::new();
    tree.random_points_seeded(100_000, 123456789);

    c.bench_function("layout_100000", |b| {
        b.iter(|| black_box(tree.layout()))
    });
}

criterion_group!(benches, benchmark_random_insert, benchmark_layout);
criterion_main!(benches);
