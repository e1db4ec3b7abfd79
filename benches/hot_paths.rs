use criterion::{black_box, criterion_group, criterion_main, Criterion};
use subsidence_map::classify::{compute_breaks, DEFAULT_BUCKETS, DEFAULT_ROUND_TO};
use subsidence_map::coast::{CoastalPoints, Coordinate};
use subsidence_map::hash::{hash2, rand_simple};

fn coastal_set(n: u64) -> CoastalPoints {
    CoastalPoints::new(
        (0..n)
            .map(|i| Coordinate {
                lat: 39.0 + rand_simple(hash2(1, i)) * 3.0,
                lon: -125.0 + rand_simple(hash2(2, i)) * 2.0,
            })
            .collect(),
    )
}

fn bench_find_nearest(c: &mut Criterion) {
    let points = coastal_set(2_000);
    let query = Coordinate { lat: 40.5, lon: -124.1 };

    c.bench_function("find_nearest_2k", |b| {
        b.iter(|| points.find_nearest(black_box(query)))
    });
}

fn bench_compute_breaks(c: &mut Criterion) {
    c.bench_function("compute_breaks", |b| {
        b.iter(|| compute_breaks(black_box(33.2), DEFAULT_BUCKETS, DEFAULT_ROUND_TO))
    });
}

criterion_group!(benches, bench_find_nearest, bench_compute_breaks);
criterion_main!(benches);
