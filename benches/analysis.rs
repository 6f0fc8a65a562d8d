//! Benchmarks for the rules engine's hot paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use woodpusher::{is_checkmate, is_in_check, is_legal, legal_moves, Board, Color, Move, Square};

// The final board of the fool's mate; White is checkmated, so the escape
// search visits every candidate without finding a way out.
const MATED: &str = "
    r n b . k b n r
    p p p p . p p p
    . . . . . . . .
    . . . . p . . .
    . . . . . . P q
    . . . . . P . .
    P P P P P . . P
    R N B Q K B N R
";

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    let start = Board::default();
    group.bench_function("pawn_double_step", |b| {
        b.iter(|| {
            is_legal(
                black_box(&start),
                Color::White.pawn(),
                Move::new(Square::E2, Square::E4),
            )
        })
    });

    // An empty board gives the queen the longest ray to walk.
    let mut open = Board::empty();
    open.set_piece_at(Square::A1, Color::White.queen());
    group.bench_function("queen_long_ray", |b| {
        b.iter(|| {
            is_legal(
                black_box(&open),
                Color::White.queen(),
                Move::new(Square::A1, Square::H8),
            )
        })
    });

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let start = Board::default();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(legal_moves(&start, Color::White)))
    });

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let start = Board::default();
    group.bench_function("is_in_check_startpos", |b| {
        b.iter(|| is_in_check(black_box(&start), Color::White))
    });

    let mated: Board = MATED.parse().expect("valid board grid");
    group.bench_function("is_in_check_mated", |b| {
        b.iter(|| is_in_check(black_box(&mated), Color::White))
    });
    group.bench_function("is_checkmate_mated", |b| {
        b.iter(|| is_checkmate(black_box(&mated), Color::White))
    });

    group.finish();
}

criterion_group!(benches, bench_rules, bench_movegen, bench_analysis);
criterion_main!(benches);
