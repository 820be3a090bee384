use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sixres_core::{Board, Piece, Placement, Rotation};
use sixres_engine::{enumerate, enumerate_exhaustive, synthesize, Geometry, MovementConfig};

fn bench_enumerate(c: &mut Criterion) {
    let geometry = Geometry::standard();
    let cfg = MovementConfig::default();

    for (width, label) in [(4, "narrow"), (10, "wide")] {
        let board = Board::new(width, 20);
        for piece in Piece::ALL {
            c.bench_function(&format!("enumerate_{label}_{piece}"), |b| {
                b.iter(|| enumerate(geometry, black_box(&board), black_box(piece), &cfg))
            });
        }
    }
}

fn bench_exhaustive(c: &mut Criterion) {
    let geometry = Geometry::standard();
    let cfg = MovementConfig::default();
    let board = Board::new(4, 20);

    c.bench_function("enumerate_exhaustive_narrow_T", |b| {
        b.iter(|| enumerate_exhaustive(geometry, black_box(&board), Piece::T, &cfg))
    });
}

fn bench_synthesize(c: &mut Criterion) {
    let geometry = Geometry::standard();
    let cfg = MovementConfig::default();
    let board = Board::from_rows(4, 20, &["GGG."]).expect("valid rows");
    let target = Placement::new(Piece::I, Rotation::East, 2, 2);

    c.bench_function("synthesize_i_well", |b| {
        b.iter(|| synthesize(geometry, black_box(&board), black_box(&target), false, &cfg))
    });
}

criterion_group!(benches, bench_enumerate, bench_exhaustive, bench_synthesize);
criterion_main!(benches);
