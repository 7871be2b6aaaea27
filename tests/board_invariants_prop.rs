//! Property tests for board invariants.
//!
//! Invariants covered:
//! - Occupied cells and the free set partition the grid after any sequence
//!   of creations, moves, match checks, scoring and spawns.
//! - Every placed marble sits on the cell that names it.
//! - Color compatibility is symmetric and reflexive.
//! - Scores never decrease.

use proptest::prelude::*;

use marbles::core::{compatible, Board};
use marbles::types::{Hue, MarbleColor, Position};

#[derive(Debug, Clone)]
enum Op {
    Create(Position, MarbleColor),
    Move(Position, Position),
    Check(Position),
    Score,
    Spawn,
    Settle,
}

fn hue() -> impl Strategy<Value = Hue> {
    (0..Hue::ALL.len()).prop_map(|i| Hue::ALL[i])
}

fn color() -> impl Strategy<Value = MarbleColor> {
    prop_oneof![
        4 => hue().prop_map(MarbleColor::single),
        2 => (hue(), hue()).prop_map(|(a, b)| MarbleColor::dual(a, b)),
        1 => Just(MarbleColor::JOKER),
        1 => Just(MarbleColor::BOMB_JOKER),
    ]
}

fn pos() -> impl Strategy<Value = Position> {
    (0..9i32, 0..9i32).prop_map(|(x, y)| Position::new(x, y))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (pos(), color()).prop_map(|(p, c)| Op::Create(p, c)),
        3 => (pos(), pos()).prop_map(|(a, b)| Op::Move(a, b)),
        3 => pos().prop_map(Op::Check),
        1 => Just(Op::Score),
        1 => Just(Op::Spawn),
        1 => Just(Op::Settle),
    ]
}

fn check_partition(board: &Board) -> Result<(), TestCaseError> {
    let mut occupied = 0usize;
    for y in 0..board.height() {
        for x in 0..board.width() {
            let pos = Position::new(x, y);
            let taken = board.grid().get(pos).is_some();
            let free = board.free_positions().contains(&pos);
            prop_assert!(taken != free, "cell {} taken={} free={}", pos, taken, free);
            if taken {
                occupied += 1;
            }
        }
    }
    prop_assert_eq!(
        occupied + board.free_positions().len(),
        (board.width() * board.height()) as usize
    );
    for marble in board.placed_marbles() {
        let at = board.marble_at(marble.position()).map(|m| m.id());
        prop_assert_eq!(at, Some(marble.id()));
    }
    Ok(())
}

proptest! {
    #[test]
    fn partition_survives_random_operations(
        seed in any::<u32>(),
        ops in prop::collection::vec(op(), 1..120),
    ) {
        let mut board = Board::new(seed);
        let mut score = 0;
        for op in ops {
            match op {
                Op::Create(p, c) => {
                    let was_free = board.free_positions().contains(&p);
                    let created = board.create_marble(p, c);
                    prop_assert_eq!(created.is_ok(), was_free);
                    if let Ok(id) = created {
                        prop_assert_eq!(board.marble_at(p).map(|m| m.id()), Some(id));
                    }
                }
                Op::Move(from, to) => {
                    board.move_marble_at(from, to).ok();
                }
                Op::Check(p) => {
                    board.check_match(p);
                }
                Op::Score => {
                    board.score_matches();
                }
                Op::Spawn => board.create_random_marbles(),
                Op::Settle => {
                    board.created_animation_finished();
                }
            }
            check_partition(&board)?;
            prop_assert!(board.total_score() >= score);
            score = board.total_score();
        }
    }

    #[test]
    fn compatibility_is_symmetric_and_reflexive(a in color(), b in color()) {
        prop_assert_eq!(compatible(a, b), compatible(b, a));
        prop_assert!(compatible(a, a));
        prop_assert!(compatible(b, b));
    }

    #[test]
    fn jokers_fit_every_hue(h in hue()) {
        prop_assert!(compatible(MarbleColor::JOKER, MarbleColor::single(h)));
        prop_assert!(compatible(MarbleColor::BOMB_JOKER, MarbleColor::single(h)));
    }
}
