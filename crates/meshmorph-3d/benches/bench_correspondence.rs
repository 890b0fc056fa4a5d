use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use meshmorph_3d::{correspond, linalg, MatchPolicy, Point3};

fn create_random_points(num_points: usize) -> Vec<Point3> {
    (0..num_points)
        .map(|_| {
            Point3::new(
                rand::random::<f64>(),
                rand::random::<f64>(),
                rand::random::<f64>(),
            )
        })
        .collect()
}

fn bench_correspond(c: &mut Criterion) {
    let mut group = c.benchmark_group("correspond");

    let policies = [
        ("nearest", MatchPolicy::Nearest),
        ("nearest_unique", MatchPolicy::NearestUnique),
        ("biased", MatchPolicy::extremeness_biased()),
        ("biased_unique", MatchPolicy::extremeness_biased_unique()),
    ];

    for num_points in [100, 500, 1000].iter() {
        group.throughput(criterion::Throughput::Elements(*num_points as u64));

        let source = create_random_points(*num_points);
        let target = create_random_points(*num_points);

        for (name, policy) in policies.iter() {
            group.bench_with_input(
                BenchmarkId::new(*name, num_points),
                &(&source, &target),
                |b, i| {
                    let (src, dst) = (i.0, i.1);
                    b.iter(|| black_box(correspond(src, dst, *policy)));
                },
            );
        }
    }
}

fn bench_transform_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_points");

    let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    let translation = Point3::new(0.1, 0.2, 0.3);

    for num_points in [1000, 10000].iter() {
        let src = create_random_points(*num_points);
        let mut dst = vec![Point3::ZERO; *num_points];

        group.bench_function(BenchmarkId::new("transform_points", num_points), |b| {
            b.iter(|| {
                linalg::transform_points(&src, &rotation, &translation, &mut dst);
                black_box(());
            });
        });
    }
}

criterion_group!(benches, bench_correspond, bench_transform_points);
criterion_main!(benches);
