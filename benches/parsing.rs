//! Benchmarking IONEX parsing
//! using a small and a global map file
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ionex_parsing(path: &str) {
    for map in ionex::from_path(path).unwrap() {
        let map = map.unwrap();
        black_box(map.tec());
    }
}

fn benchmark(c: &mut Criterion) {
    let mut parsing_grp = c.benchmark_group("parsing");

    // Three small maps
    parsing_grp.bench_function("IONEX/V1/small", |b| {
        b.iter(|| {
            ionex_parsing("test_resources/IONEX/V1/TRIP0020.22I");
        })
    });

    // Two global maps (2.5 x 5 deg)
    parsing_grp.bench_function("IONEX/V1/global", |b| {
        b.iter(|| {
            ionex_parsing("test_resources/IONEX/V1/GLOB0060.22I");
        })
    });

    parsing_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
