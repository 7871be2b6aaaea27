//! Relative ways - a path expressed as straight runs and jumps.
//!
//! Front-ends animate a move segment by segment; a run of several cells in
//! one direction is a single segment, a jump-hole step is its own segment.

use serde::{Deserialize, Serialize};

use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit offset of one step
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Direction from `from` to `to` when both share a row or a column
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if from == to {
            return None;
        }
        if from.x == to.x {
            return Some(if from.y < to.y {
                Direction::Down
            } else {
                Direction::Up
            });
        }
        if from.y == to.y {
            return Some(if from.x < to.x {
                Direction::Right
            } else {
                Direction::Left
            });
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelativeWay {
    /// `range` single steps in `direction`
    Step { direction: Direction, range: u32 },
    /// Teleport through a jump hole
    Jump { to: Position },
}

/// Compress a cell path into relative ways
///
/// # Examples
///
/// ```
/// use marbles_pathfind::{relative_ways, Direction, RelativeWay};
/// use marbles_types::Position;
///
/// let path = [
///     Position::new(0, 0),
///     Position::new(1, 0),
///     Position::new(2, 0),
///     Position::new(2, 1),
/// ];
/// assert_eq!(
///     relative_ways(&path),
///     vec![
///         RelativeWay::Step { direction: Direction::Right, range: 2 },
///         RelativeWay::Step { direction: Direction::Down, range: 1 },
///     ]
/// );
/// ```
pub fn relative_ways(path: &[Position]) -> Vec<RelativeWay> {
    let mut ways: Vec<RelativeWay> = Vec::new();
    for w in path.windows(2) {
        let (from, to) = (w[0], w[1]);
        if !from.is_adjacent(to) {
            ways.push(RelativeWay::Jump { to });
            continue;
        }
        let Some(direction) = Direction::between(from, to) else {
            continue;
        };
        match ways.last_mut() {
            Some(RelativeWay::Step {
                direction: last,
                range,
            }) if *last == direction => *range += 1,
            _ => ways.push(RelativeWay::Step {
                direction,
                range: 1,
            }),
        }
    }
    ways
}

/// Expand relative ways back into the cells visited after `start`
pub fn expand_ways(start: Position, ways: &[RelativeWay]) -> Vec<Position> {
    let mut cells = Vec::new();
    let mut at = start;
    for way in ways {
        match *way {
            RelativeWay::Step { direction, range } => {
                let (dx, dy) = direction.offset();
                for _ in 0..range {
                    at = at.offset(dx, dy);
                    cells.push(at);
                }
            }
            RelativeWay::Jump { to } => {
                at = to;
                cells.push(at);
            }
        }
    }
    cells
}
