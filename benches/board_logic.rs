use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3_sim::core::BoardModel;
use match3_sim::types::Cell;

fn bench_randomize(c: &mut Criterion) {
    let mut board = BoardModel::new(8, 9, 6, 12345).unwrap();

    c.bench_function("randomize_8x9", |b| {
        b.iter(|| {
            board.randomize().unwrap();
        })
    });
}

fn bench_get_matches(c: &mut Criterion) {
    let mut board = BoardModel::new(8, 9, 6, 12345).unwrap();
    board.randomize().unwrap();
    board.fill();

    c.bench_function("get_matches_8x9", |b| {
        b.iter(|| black_box(board.get_matches()))
    });
}

fn bench_gravity(c: &mut Criterion) {
    c.bench_function("gravity_cleared_rows", |b| {
        b.iter(|| {
            let mut board = BoardModel::new(8, 9, 6, 12345).unwrap();
            board.randomize().unwrap();
            // Knock out the bottom 3 rows
            for y in 0..3 {
                for x in 0..8 {
                    board.clear_cell(Cell::new(x, y));
                }
            }
            black_box(board.gravity().unwrap());
        })
    });
}

fn bench_cascade_step(c: &mut Criterion) {
    let mut board = BoardModel::new(8, 9, 6, 12345).unwrap();
    board.randomize().unwrap();

    c.bench_function("remove_fill_plan", |b| {
        b.iter(|| {
            let matches = board.get_matches();
            board.remove_all(&matches);
            board.spawn_top_row();
            black_box(board.plan_gravity())
        })
    });
}

criterion_group!(
    benches,
    bench_randomize,
    bench_get_matches,
    bench_gravity,
    bench_cascade_step
);
criterion_main!(benches);
