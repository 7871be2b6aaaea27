use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marbles::core::{Board, SimpleRng};
use marbles::engine::{apply_move, random_move};
use marbles::types::{Hue, MarbleColor, Position};

fn walled_board() -> Board {
    let mut board = Board::new(12345);
    let blue = MarbleColor::single(Hue::Blue);
    for y in 0..8 {
        board.create_marble(Position::new(4, y), blue).unwrap();
    }
    board
}

fn bench_find_path(c: &mut Criterion) {
    let mut board = walled_board();
    let id = board
        .create_marble(Position::new(0, 0), MarbleColor::single(Hue::Red))
        .unwrap();

    c.bench_function("find_path_around_wall", |b| {
        b.iter(|| board.find_path(id, black_box(Position::new(8, 0))))
    });
}

fn bench_find_path_with_jumps(c: &mut Criterion) {
    let mut board = walled_board();
    board
        .jump_holes_mut()
        .add(Position::new(1, 0), Position::new(7, 0));
    board
        .jump_holes_mut()
        .add(Position::new(7, 0), Position::new(1, 0));
    let id = board
        .create_marble(Position::new(0, 0), MarbleColor::single(Hue::Red))
        .unwrap();

    c.bench_function("find_path_jump_hole", |b| {
        b.iter(|| board.find_path(id, black_box(Position::new(8, 8))))
    });
}

fn bench_check_match(c: &mut Criterion) {
    let red = MarbleColor::single(Hue::Red);
    c.bench_function("check_match_two_runs", |b| {
        b.iter(|| {
            let mut board = Board::new(1);
            for i in 0..4 {
                board.create_marble(Position::new(i, 4), red).unwrap();
                board.create_marble(Position::new(4, i), red).unwrap();
            }
            board.create_marble(Position::new(4, 4), red).unwrap();
            let matched = board.check_match(black_box(Position::new(4, 4)));
            board.score_matches();
            matched
        })
    });
}

fn bench_autoplay_turn(c: &mut Criterion) {
    c.bench_function("autoplay_20_turns", |b| {
        b.iter(|| {
            let mut board = Board::new(black_box(9));
            board.new_game();
            board.created_animation_finished();
            let mut rng = SimpleRng::new(7);
            for _ in 0..20 {
                let Some((from, to)) = random_move(&mut board, &mut rng) else {
                    break;
                };
                if apply_move(&mut board, from, to).is_err() {
                    break;
                }
            }
            board.total_score()
        })
    });
}

criterion_group!(
    benches,
    bench_find_path,
    bench_find_path_with_jumps,
    bench_check_match,
    bench_autoplay_turn
);
criterion_main!(benches);
