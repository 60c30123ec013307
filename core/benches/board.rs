use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;
use sweeper_core::*;

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for (name, config) in [
        ("beginner", GameConfig::new(9, 10)),
        ("expert", GameConfig::new(30, 180)),
        ("max", GameConfig::new(Coord::MAX, 13_000)),
    ] {
        group.bench_function(name, |b| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| Board::from_layout(&shuffle_mines(black_box(config), &mut rng)))
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let empty = Board::from_layout(&MineLayout::from_mine_coords(Coord::MAX, &[]).unwrap());
    c.bench_function("flood_fill/empty_max", |b| {
        b.iter_batched(
            || empty.clone(),
            |mut board| board.resolve(TurnRequest::expose(0, 0)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, placement, flood_fill);
criterion_main!(benches);
