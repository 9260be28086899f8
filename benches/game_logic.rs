use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falling_blocks::core::{try_rotate, Board, Game, ManualPlatform, Tetromino};
use falling_blocks::types::{Color, GameEvents, PieceKind};

fn new_game() -> Game<ManualPlatform> {
    Game::new(ManualPlatform::new())
}

fn bench_update(c: &mut Criterion) {
    let mut game = new_game();
    let mut now = 0u64;

    c.bench_function("update_16ms", |b| {
        b.iter(|| {
            now += 16;
            game.update(black_box(GameEvents::empty()), now);
            if game.is_over() {
                game.update(GameEvents::RESTART, now);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 18..22 {
                for x in 0..10 {
                    board.set(x, y, Some(Color::Cyan));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = new_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            game.drop_tetromino();
            if game.is_over() {
                game.update(GameEvents::RESTART, 0);
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = new_game();
    let mut dx = 1;

    c.bench_function("move_sideways", |b| {
        b.iter(|| {
            if game.check_collision(dx, 0) {
                dx = -dx;
            }
            game.move_tetromino(black_box(dx), 0);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Tetromino::from_kind(PieceKind::T);
    piece.reset_position();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            if let Some(rotated) = try_rotate(&board, black_box(&piece), true, true) {
                piece = rotated;
            }
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
