use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::marble::{Marble, MarbleId};
use crate::types::{MarbleColor, MarbleState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarbleSnapshot {
    pub id: MarbleId,
    pub color: MarbleColor,
    pub position: Position,
    pub state: MarbleState,
}

impl From<&Marble> for MarbleSnapshot {
    fn from(value: &Marble) -> Self {
        Self {
            id: value.id(),
            color: value.color(),
            position: value.position(),
            state: value.state(),
        }
    }
}

/// Serializable view of a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    /// Rows of color codes ([`MarbleColor::to_bits`]), 0 for an empty cell
    pub board: Vec<Vec<u16>>,
    /// Placed marbles in creation order
    pub marbles: Vec<MarbleSnapshot>,
    /// Preview marbles in placement order
    pub next: Vec<MarbleSnapshot>,
    pub total_score: u32,
    pub last_move_score: u32,
    pub free_cells: usize,
    pub rng_state: u32,
}

impl BoardSnapshot {
    /// Color code at `pos`; `None` outside the board
    pub fn cell(&self, pos: Position) -> Option<u16> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.board
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }
}

impl Board {
    /// Write the board state into `out`, reusing its allocations
    ///
    /// Existing rows are overwritten in place; rows are only allocated when
    /// the board grew since the last call.
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.width = self.width();
        out.height = self.height();
        out.board.resize_with(self.height().max(0) as usize, Vec::new);
        for (y, row) in (0..).zip(out.board.iter_mut()) {
            row.clear();
            row.extend((0..self.width()).map(|x| {
                self.marble_at(Position::new(x, y))
                    .map_or(0, |m| m.color().to_bits())
            }));
        }
        out.marbles.clear();
        out.next.clear();
        out.marbles
            .extend(self.placed_marbles().map(MarbleSnapshot::from));
        out.next.extend(self.next_marbles().map(MarbleSnapshot::from));
        out.total_score = self.total_score();
        out.last_move_score = self.last_move_score();
        out.free_cells = self.free_positions().len();
        out.rng_state = self.rng_state();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
