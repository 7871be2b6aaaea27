//! Grid module - cell occupancy of a board
//!
//! The grid is a flat row-major array of marble ids plus the ordered set of
//! free cells. Both are updated together, so at any time the occupied cells
//! and the free set partition the whole grid. The grid also serves as the
//! cost source of path searches: free cells cost [`FREE_CELL_COST`], occupied
//! or missing cells [`BLOCKED_CELL_COST`].

use std::collections::BTreeSet;

use crate::marble::MarbleId;
use crate::types::{Position, BLOCKED_CELL_COST, FREE_CELL_COST};
use marbles_pathfind::CellCosts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<MarbleId>>,
    free: BTreeSet<Position>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: i32, height: i32) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: Vec::new(),
            free: BTreeSet::new(),
        };
        grid.clear();
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    /// Marble occupying `pos`; `None` for empty or out-of-grid cells
    pub fn get(&self, pos: Position) -> Option<MarbleId> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, pos: Position) -> bool {
        self.free.contains(&pos)
    }

    /// Occupy `pos` with `id`, returning the previous occupant
    ///
    /// Returns `None` without change when `pos` is out of bounds.
    pub fn set(&mut self, pos: Position, id: MarbleId) -> Option<MarbleId> {
        let idx = self.index(pos)?;
        self.free.remove(&pos);
        self.cells[idx].replace(id)
    }

    /// Empty `pos`, returning its occupant
    pub fn take(&mut self, pos: Position) -> Option<MarbleId> {
        let idx = self.index(pos)?;
        let previous = self.cells[idx].take();
        self.free.insert(pos);
        previous
    }

    /// Free cells, ordered by x, then y
    pub fn free_positions(&self) -> &BTreeSet<Position> {
        &self.free
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// The `n`th free cell in set order
    pub fn nth_free(&self, n: usize) -> Option<Position> {
        self.free.iter().nth(n).copied()
    }

    /// Occupied cells with their marbles, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (Position, MarbleId)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let pos = Position::new(idx as i32 % width, idx as i32 / width);
            cell.map(|id| (pos, id))
        })
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        let len = self.width.max(0) as usize * self.height.max(0) as usize;
        self.cells.clear();
        self.cells.resize(len, None);
        self.free.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                self.free.insert(Position::new(x, y));
            }
        }
    }
}

impl CellCosts for Grid {
    fn cell_cost(&self, pos: Position) -> u16 {
        match self.index(pos) {
            Some(idx) if self.cells[idx].is_none() => FREE_CELL_COST,
            _ => BLOCKED_CELL_COST,
        }
    }
}
