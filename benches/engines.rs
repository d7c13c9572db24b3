use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{Rng, SeedableRng};
use sparse_life::{create_engine, Cell, CellSet, EngineKind};

fn soup(seed: u64, side: i64, count: usize) -> CellSet {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Cell::new(rng.gen_range(0..side), rng.gen_range(0..side)))
        .collect()
}

/// Many small soups scattered over a huge area.
fn scattered(seed: u64, groups: usize) -> CellSet {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut cells = CellSet::default();
    for _ in 0..groups {
        let (x0, y0) = (rng.gen_range(-1i64 << 40..1 << 40), rng.gen_range(-1i64 << 40..1 << 40));
        cells.extend(soup(rng.gen(), 32, 300).into_iter().map(|c| Cell::new(x0 + c.x, y0 + c.y)));
    }
    cells
}

fn bench_engines(c: &mut Criterion, name: &str, cells: &CellSet) {
    let mut group = c.benchmark_group(name);
    for kind in EngineKind::ALL {
        let mut engine = create_engine(kind);
        group.bench_function(kind.name(), |b| {
            b.iter_batched_ref(|| cells.clone(), |cells| engine.advance(cells), BatchSize::LargeInput)
        });
    }
    group.finish();
}

fn bench_dense_soup(c: &mut Criterion) {
    bench_engines(c, "dense_soup", &soup(42, 256, 256 * 256 / 3));
}

fn bench_scattered(c: &mut Criterion) {
    bench_engines(c, "scattered", &scattered(42, 200));
}

criterion_group!(benches, bench_dense_soup, bench_scattered);
criterion_main!(benches);
