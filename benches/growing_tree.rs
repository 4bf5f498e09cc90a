use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mazegrow::{
    Grid,
    generators::{GrowingTree, get_rng},
};

const SIZE: u16 = 100;

pub fn growing_tree_seeded(c: &mut Criterion) {
    c.bench_function("growing_tree_seeded", |b| {
        b.iter(|| mazegrow::generate(black_box(SIZE), black_box(SIZE), Some(7)).unwrap())
    });
}

pub fn growing_tree_wide(c: &mut Criterion) {
    let grid = Grid::new(1000, 10).unwrap();
    c.bench_function("growing_tree_wide", |b| {
        b.iter(|| {
            let mut tree = GrowingTree::new(black_box(grid), get_rng(Some(7)));
            tree.run().unwrap();
            tree.into_maze()
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = growing_tree_seeded, growing_tree_wide}
criterion_main!(benches);
