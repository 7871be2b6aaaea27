//! Board module - the authoritative game state
//!
//! A board owns the occupancy grid, every marble (placed or waiting in the
//! preview buffer), pending match results, scores, the seeded generator and
//! the path finder used for moves.
//!
//! Nothing here runs on its own. A front-end drives a turn by calling the
//! entry points in order and reacting to the queued [`BoardEvent`]s:
//!
//! ```text
//! find_path -> move_marble -> check_match
//!   matched:    score_matches
//!   no match:   create_random_marbles -> created_animation_finished
//!                 matched: score_matches
//! ```
//!
//! Moving a marble never checks for matches by itself; spawning places
//! marbles through the same move and must not score on its own.

use std::collections::BTreeSet;
use std::mem;

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::events::BoardEvent;
use crate::grid::Grid;
use crate::marble::{Marble, MarbleId};
use crate::matching::{scan_line, MatchRun, LINE_DIRECTIONS};
use crate::rng::SimpleRng;
use crate::scoring::calculate_score;
use crate::types::{Hue, MarbleColor, MarbleState, Position, Region};
use marbles_pathfind::{JumpHoles, Path, PathFinder};

/// Regions a player move may cross
const MOVE_REGIONS: [Region; 1] = [Region::Default];

#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    /// Placed and preview marbles, in creation order
    marbles: Vec<Marble>,
    /// Preview buffer, in placement order
    next_marbles: Vec<MarbleId>,
    /// Runs found since the last scoring
    matches: Vec<MatchRun>,
    bombed: Vec<MarbleId>,
    total_score: u32,
    last_move_score: u32,
    next_id: u32,
    rng: SimpleRng,
    path_finder: PathFinder,
    jump_holes: JumpHoles,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create an empty default-sized board with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(BoardConfig {
            seed,
            ..BoardConfig::default()
        })
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let config = config.normalized();
        Self {
            grid: Grid::new(config.width, config.height),
            marbles: Vec::new(),
            next_marbles: Vec::with_capacity(config.preview_count),
            matches: Vec::new(),
            bombed: Vec::new(),
            total_score: 0,
            last_move_score: 0,
            next_id: 0,
            rng: SimpleRng::new(config.seed),
            path_finder: PathFinder::with_config(config.width, config.height, config.path),
            jump_holes: JumpHoles::new(),
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn position_in_map(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles.iter().find(|m| m.id == id)
    }

    fn marble_mut(&mut self, id: MarbleId) -> Option<&mut Marble> {
        self.marbles.iter_mut().find(|m| m.id == id)
    }

    /// Marble occupying `pos`; `None` for empty and out-of-grid cells
    pub fn marble_at(&self, pos: Position) -> Option<&Marble> {
        self.grid.get(pos).and_then(|id| self.marble(id))
    }

    /// Every tracked marble, placed and preview
    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    /// Marbles occupying a cell
    pub fn placed_marbles(&self) -> impl Iterator<Item = &Marble> + '_ {
        self.marbles.iter().filter(|m| m.on_board)
    }

    /// Preview marbles in the order they will be placed
    pub fn next_marbles(&self) -> impl Iterator<Item = &Marble> + '_ {
        self.next_marbles.iter().filter_map(|&id| self.marble(id))
    }

    pub fn free_positions(&self) -> &BTreeSet<Position> {
        self.grid.free_positions()
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn last_move_score(&self) -> u32 {
        self.last_move_score
    }

    /// Runs matched since the last scoring
    pub fn matches(&self) -> &[MatchRun] {
        &self.matches
    }

    /// Whether a pending run holds a bomb-joker
    pub fn match_has_bomb(&self) -> bool {
        self.matches.iter().any(MatchRun::has_bomb)
    }

    /// Marbles exploded by bomb effects since the last scoring
    pub fn bombed_marbles(&self) -> &[MarbleId] {
        &self.bombed
    }

    /// Whether the player may pick up the marble at `pos`
    ///
    /// Bomb-jokers stay where they spawned.
    pub fn can_select(&self, pos: Position) -> bool {
        self.marble_at(pos).is_some_and(|m| !m.color.is_bomb_joker())
    }

    /// No free cell is left
    pub fn is_full(&self) -> bool {
        self.grid.free_count() == 0
    }

    pub fn jump_holes(&self) -> &JumpHoles {
        &self.jump_holes
    }

    /// Jump holes offered to move searches
    pub fn jump_holes_mut(&mut self) -> &mut JumpHoles {
        &mut self.jump_holes
    }

    pub fn path_finder(&self) -> &PathFinder {
        &self.path_finder
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        mem::take(&mut self.events)
    }

    /// Current state of the marble generator
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Create a marble of `color` at `pos`
    pub fn create_marble(
        &mut self,
        pos: Position,
        color: MarbleColor,
    ) -> Result<MarbleId, BoardError> {
        if !self.position_in_map(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.grid.get(pos).is_some() {
            return Err(BoardError::CellOccupied(pos));
        }
        let id = self.spawn(color, pos);
        self.place(id, pos);
        info!(marble = %id, %color, position = %pos, "create marble");
        Ok(id)
    }

    /// Move marble `id` to `target`
    ///
    /// A marble already at `target` is dropped from the board and returned;
    /// releasing its render resources is up to the caller. No match check
    /// happens here.
    pub fn move_marble(
        &mut self,
        id: MarbleId,
        target: Position,
    ) -> Result<Option<Marble>, BoardError> {
        if !self.position_in_map(target) {
            return Err(BoardError::OutOfBounds(target));
        }
        if self.marble(id).is_none() {
            return Err(BoardError::UnknownMarble(id));
        }
        Ok(self.place(id, target))
    }

    /// Move the marble at `from` to `target`; nothing happens if `from` is empty
    pub fn move_marble_at(
        &mut self,
        from: Position,
        target: Position,
    ) -> Result<Option<Marble>, BoardError> {
        match self.grid.get(from) {
            Some(id) => self.move_marble(id, target),
            None => Ok(None),
        }
    }

    /// Drop a marble from the board without scoring it
    pub fn remove_marble(&mut self, id: MarbleId) -> Option<Marble> {
        self.untrack(id)
    }

    pub fn remove_marble_at(&mut self, pos: Position) -> Option<Marble> {
        let id = self.grid.get(pos)?;
        self.untrack(id)
    }

    /// Search a path for marble `id` to `target`
    ///
    /// Only free cells of the default region and the board's jump holes are
    /// used. Preview marbles have no path.
    pub fn find_path(
        &mut self,
        id: MarbleId,
        target: Position,
    ) -> Result<Option<Path>, BoardError> {
        let marble = self.marble(id).ok_or(BoardError::UnknownMarble(id))?;
        if !marble.on_board {
            return Ok(None);
        }
        let start = marble.position;
        let path = self.path_finder.find_path_with_jumps(
            &self.grid,
            start,
            target,
            &MOVE_REGIONS,
            &self.jump_holes,
        )?;
        Ok(path)
    }

    /// Check the four lines through `origin` for runs
    ///
    /// Matched marbles become [`MarbleState::Removing`]; a run holding a
    /// bomb-joker also explodes the marbles of its primary color. Queues one
    /// [`BoardEvent::Matched`] and returns true if this call found a run.
    pub fn check_match(&mut self, origin: Position) -> bool {
        if self.collect_matches(origin) == 0 {
            return false;
        }
        let has_bomb = self.match_has_bomb();
        self.events.push(BoardEvent::Matched { has_bomb });
        true
    }

    fn collect_matches(&mut self, origin: Position) -> usize {
        match self.marble_at(origin) {
            Some(m) if !m.state.is_removed() => {}
            _ => return 0,
        }

        let mut runs: ArrayVec<MatchRun, 4> = ArrayVec::new();
        let marbles = &self.marbles;
        for step in LINE_DIRECTIONS {
            let color_of = |id: MarbleId| marbles.iter().find(|m| m.id == id).map(|m| m.color);
            if let Some(run) = scan_line(&self.grid, origin, step, color_of) {
                runs.push(run);
            }
        }
        if runs.is_empty() {
            return 0;
        }

        for marble in &mut self.marbles {
            if runs.iter().any(|run| run.contains(marble.id)) {
                marble.state = MarbleState::Removing;
            }
        }
        let bomb_hues: ArrayVec<Hue, 4> = runs
            .iter()
            .filter(|run| run.has_bomb())
            .filter_map(MatchRun::primary_color)
            .collect();

        let found = runs.len();
        debug!(origin = %origin, runs = found, bombs = bomb_hues.len(), "match");
        self.matches.extend(runs);
        for hue in bomb_hues {
            self.apply_bomb(hue);
        }
        found
    }

    /// Explode every placed marble of exactly `hue` that is not matched yet
    fn apply_bomb(&mut self, hue: Hue) {
        let target = MarbleColor::single(hue);
        let before = self.bombed.len();
        for marble in &mut self.marbles {
            // Run members are already Removing
            if !marble.on_board || marble.color != target || marble.state.is_removed() {
                continue;
            }
            marble.state = MarbleState::Exploding;
            self.bombed.push(marble.id);
        }
        debug!(?hue, exploded = self.bombed.len() - before, "bomb");
    }

    /// Score pending matches and drop every removing or exploding marble
    ///
    /// Returns the points of this move, also kept as the last move score.
    pub fn score_matches(&mut self) -> u32 {
        let result = calculate_score(self.matches.iter().map(MatchRun::len), self.bombed.len());
        self.last_move_score = result.total;
        self.total_score = self.total_score.saturating_add(result.total);

        let disposed: Vec<MarbleId> = self
            .marbles
            .iter()
            .filter(|m| m.state.is_removed())
            .map(|m| m.id)
            .collect();
        for &id in &disposed {
            self.untrack(id);
        }
        self.matches.clear();
        self.bombed.clear();

        debug!(
            runs = result.runs,
            score = result.total,
            total = self.total_score,
            removed = disposed.len(),
            "score matches"
        );
        if !disposed.is_empty() {
            self.events.push(BoardEvent::Disposed(disposed));
        }
        result.total
    }

    /// Place the preview marbles and generate the next batch
    ///
    /// A preview marble whose reserved cell got taken is placed on another
    /// random free cell, or dropped if the board is full. Queues
    /// [`BoardEvent::NewMarbles`] if anything was placed.
    pub fn create_random_marbles(&mut self) {
        if self.next_marbles.is_empty() {
            self.pre_create_random_marbles();
        }

        let batch = mem::take(&mut self.next_marbles);
        let mut placed = 0usize;
        let mut dropped = Vec::new();
        for id in batch {
            let Some(reserved) = self.marble(id).map(Marble::position) else {
                continue;
            };
            let target = if self.grid.is_free(reserved) {
                Some(reserved)
            } else {
                self.random_position()
            };
            let Some(target) = target else {
                self.untrack(id);
                dropped.push(id);
                continue;
            };
            self.place(id, target);
            if let Some(marble) = self.marble_mut(id) {
                marble.state = MarbleState::Adding;
            }
            placed += 1;
        }

        self.pre_create_random_marbles();

        debug!(
            placed,
            dropped = dropped.len(),
            free = self.grid.free_count(),
            "spawn marbles"
        );
        if !dropped.is_empty() {
            self.events.push(BoardEvent::Disposed(dropped));
        }
        if placed > 0 {
            self.events.push(BoardEvent::NewMarbles);
        }
    }

    /// Refill the preview buffer with freshly generated marbles
    ///
    /// Each preview marble reserves a random free cell; reservations are not
    /// exclusive and may coincide.
    pub fn pre_create_random_marbles(&mut self) {
        let stale: Vec<MarbleId> = mem::take(&mut self.next_marbles)
            .into_iter()
            .filter(|&id| self.untrack(id).is_some())
            .collect();
        if !stale.is_empty() {
            self.events.push(BoardEvent::Disposed(stale));
        }

        for _ in 0..self.config.preview_count {
            let Some(pos) = self.random_position() else {
                break;
            };
            let color = self.rng.marble_color();
            let id = self.spawn(color, pos);
            if let Some(marble) = self.marble_mut(id) {
                marble.state = MarbleState::PreAdding;
            }
            self.next_marbles.push(id);
        }
    }

    /// Settle freshly spawned marbles and check them for matches
    ///
    /// Preview marbles go from `PreAdding` to `PreDefault`, placed marbles
    /// from `Adding` to `Default`. Returns true and queues one
    /// [`BoardEvent::Matched`] if any settled marble completed a run.
    pub fn created_animation_finished(&mut self) -> bool {
        let mut settled = Vec::new();
        for marble in &mut self.marbles {
            match marble.state {
                MarbleState::PreAdding => marble.state = MarbleState::PreDefault,
                MarbleState::Adding => {
                    marble.state = MarbleState::Default;
                    if marble.on_board {
                        settled.push(marble.position);
                    }
                }
                _ => {}
            }
        }

        let found: usize = settled
            .into_iter()
            .map(|pos| self.collect_matches(pos))
            .sum();
        if found == 0 {
            return false;
        }
        let has_bomb = self.match_has_bomb();
        self.events.push(BoardEvent::Matched { has_bomb });
        true
    }

    /// Clear the board and spawn the first marbles
    pub fn new_game(&mut self) {
        self.clear_board();
        self.create_random_marbles();
        info!(seed = self.config.seed, marbles = self.marbles.len(), "new game");
    }

    /// Drop every marble and reset the scores
    pub fn clear_board(&mut self) {
        let disposed: Vec<MarbleId> = self.marbles.iter().map(|m| m.id).collect();
        self.marbles.clear();
        self.next_marbles.clear();
        self.matches.clear();
        self.bombed.clear();
        self.grid.clear();
        self.total_score = 0;
        self.last_move_score = 0;
        if !disposed.is_empty() {
            self.events.push(BoardEvent::Disposed(disposed));
        }
    }

    /// Register a new, not yet placed marble
    fn spawn(&mut self, color: MarbleColor, pos: Position) -> MarbleId {
        let id = MarbleId(self.next_id);
        self.next_id += 1;
        self.marbles.push(Marble::new(id, color, pos));
        id
    }

    /// Put a tracked marble on `target`, dropping any other occupant
    fn place(&mut self, id: MarbleId, target: Position) -> Option<Marble> {
        let vacated = self
            .marble(id)
            .filter(|m| m.on_board)
            .map(|m| m.position);
        if let Some(old) = vacated {
            if self.grid.get(old) == Some(id) {
                self.grid.take(old);
            }
        }

        let displaced = match self.grid.get(target) {
            Some(other) if other != id => self.untrack(other),
            _ => None,
        };

        self.next_marbles.retain(|&n| n != id);
        self.grid.set(target, id);
        if let Some(marble) = self.marble_mut(id) {
            marble.position = target;
            marble.on_board = true;
        }
        displaced
    }

    /// Stop tracking a marble, freeing its cell
    fn untrack(&mut self, id: MarbleId) -> Option<Marble> {
        let idx = self.marbles.iter().position(|m| m.id == id)?;
        let mut marble = self.marbles.remove(idx);
        if marble.on_board && self.grid.get(marble.position) == Some(id) {
            self.grid.take(marble.position);
        }
        marble.on_board = false;
        self.next_marbles.retain(|&n| n != id);
        self.bombed.retain(|&n| n != id);
        Some(marble)
    }

    fn random_position(&mut self) -> Option<Position> {
        let count = self.grid.free_count();
        if count == 0 {
            return None;
        }
        let n = self.rng.pick(count as u32 - 1) as usize;
        self.grid.nth_free(n)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_config(BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLOCKED_CELL_COST, MIN_RUN};
    use marbles_pathfind::CellCosts;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn red() -> MarbleColor {
        MarbleColor::single(Hue::Red)
    }

    fn blue() -> MarbleColor {
        MarbleColor::single(Hue::Blue)
    }

    fn assert_consistent(board: &Board) {
        let mut occupied = 0;
        for y in 0..board.height() {
            for x in 0..board.width() {
                let pos = p(x, y);
                match board.marble_at(pos) {
                    Some(m) => {
                        occupied += 1;
                        assert_eq!(m.position(), pos);
                        assert!(m.on_board());
                        assert!(!board.free_positions().contains(&pos));
                    }
                    None => assert!(board.free_positions().contains(&pos), "{pos}"),
                }
            }
        }
        assert_eq!(occupied + board.free_positions().len(), 81);
        for marble in board.marbles() {
            if marble.on_board() {
                assert_eq!(board.grid().get(marble.position()), Some(marble.id()));
            } else {
                assert!(board.next_marbles().any(|n| n.id() == marble.id()));
            }
        }
    }

    #[test]
    fn test_create_marble() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(3, 4), red()).unwrap();
        let marble = board.marble_at(p(3, 4)).unwrap();
        assert_eq!(marble.id(), id);
        assert_eq!(marble.color(), red());
        assert_eq!(marble.state(), MarbleState::Default);
        assert_eq!(board.free_positions().len(), 80);
        assert_consistent(&board);
    }

    #[test]
    fn test_create_marble_on_occupied_cell_fails() {
        let mut board = Board::new(1);
        board.create_marble(p(0, 0), red()).unwrap();
        assert_eq!(
            board.create_marble(p(0, 0), blue()),
            Err(BoardError::CellOccupied(p(0, 0)))
        );
        assert_eq!(
            board.create_marble(p(9, 0), blue()),
            Err(BoardError::OutOfBounds(p(9, 0)))
        );
        assert_eq!(board.marbles().len(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_move_marble_updates_occupancy() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(0, 0), red()).unwrap();
        assert_eq!(board.move_marble(id, p(5, 5)), Ok(None));
        assert!(board.marble_at(p(0, 0)).is_none());
        assert_eq!(board.marble_at(p(5, 5)).map(Marble::id), Some(id));
        assert_consistent(&board);
    }

    #[test]
    fn test_move_marble_displaces_occupant() {
        let mut board = Board::new(1);
        let a = board.create_marble(p(0, 0), red()).unwrap();
        let b = board.create_marble(p(1, 0), blue()).unwrap();
        let displaced = board.move_marble(a, p(1, 0)).unwrap().unwrap();
        assert_eq!(displaced.id(), b);
        assert!(!displaced.on_board());
        assert!(board.marble(b).is_none());
        assert_eq!(board.marbles().len(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_move_marble_errors() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(0, 0), red()).unwrap();
        assert_eq!(
            board.move_marble(id, p(0, 9)),
            Err(BoardError::OutOfBounds(p(0, 9)))
        );
        assert_eq!(
            board.move_marble(MarbleId(99), p(1, 1)),
            Err(BoardError::UnknownMarble(MarbleId(99)))
        );
        assert_eq!(board.move_marble_at(p(4, 4), p(1, 1)), Ok(None));
    }

    #[test]
    fn test_move_never_checks_matches() {
        let mut board = Board::new(1);
        for y in 0..4 {
            board.create_marble(p(0, y), red()).unwrap();
        }
        let id = board.create_marble(p(3, 3), red()).unwrap();
        board.move_marble(id, p(0, 4)).unwrap();
        assert!(board.matches().is_empty());
        assert!(board.events().is_empty());
        assert!(board.marbles().iter().all(|m| m.state() == MarbleState::Default));
    }

    #[test]
    fn test_remove_marble() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(2, 2), red()).unwrap();
        assert_eq!(board.remove_marble_at(p(2, 2)).map(|m| m.id()), Some(id));
        assert!(board.remove_marble(id).is_none());
        assert_eq!(board.free_positions().len(), 81);
    }

    #[test]
    fn test_five_in_column_match() {
        let mut board = Board::new(1);
        for y in 0..5 {
            board.create_marble(p(0, y), red()).unwrap();
        }
        assert!(board.check_match(p(0, 4)));
        assert!(board
            .marbles()
            .iter()
            .all(|m| m.state() == MarbleState::Removing));
        assert_eq!(
            board.take_events(),
            vec![BoardEvent::Matched { has_bomb: false }]
        );
        assert_eq!(board.matches().len(), 1);
        assert_eq!(board.matches()[0].len(), MIN_RUN);
    }

    #[test]
    fn test_four_do_not_match() {
        let mut board = Board::new(1);
        for x in 0..4 {
            board.create_marble(p(x, 0), red()).unwrap();
        }
        assert!(!board.check_match(p(3, 0)));
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_check_empty_origin() {
        let mut board = Board::new(1);
        assert!(!board.check_match(p(4, 4)));
        assert!(!board.check_match(p(-1, 4)));
    }

    #[test]
    fn test_cross_match_scores_multiplied() {
        let mut board = Board::new(1);
        for i in 0..5 {
            if i != 2 {
                board.create_marble(p(i, 2), red()).unwrap();
                board.create_marble(p(2, i), red()).unwrap();
            }
        }
        board.create_marble(p(2, 2), red()).unwrap();
        assert!(board.check_match(p(2, 2)));
        assert_eq!(board.matches().len(), 2);
        assert_eq!(board.score_matches(), 40);
        assert_eq!(board.total_score(), 40);
        assert!(board.marbles().is_empty());
    }

    #[test]
    fn test_six_run_scores_twenty() {
        let mut board = Board::new(1);
        for x in 0..6 {
            board.create_marble(p(x, 8), blue()).unwrap();
        }
        assert!(board.check_match(p(0, 8)));
        assert_eq!(board.score_matches(), 20);
        assert_eq!(board.last_move_score(), 20);
    }

    #[test]
    fn test_score_matches_disposes() {
        let mut board = Board::new(1);
        let ids: Vec<_> = (0..5)
            .map(|x| board.create_marble(p(x, 0), red()).unwrap())
            .collect();
        let keep = board.create_marble(p(0, 1), red()).unwrap();
        board.check_match(p(0, 0));
        board.take_events();
        board.score_matches();

        assert_eq!(board.take_events(), vec![BoardEvent::Disposed(ids)]);
        assert_eq!(board.marbles().len(), 1);
        assert_eq!(board.marble_at(p(0, 1)).map(Marble::id), Some(keep));
        assert!(board.matches().is_empty());
        assert_consistent(&board);
    }

    #[test]
    fn test_bomb_explodes_primary_color() {
        let mut board = Board::new(1);
        for x in 0..4 {
            board.create_marble(p(x, 0), red()).unwrap();
        }
        board.create_marble(p(4, 0), MarbleColor::BOMB_JOKER).unwrap();
        let far_red = board.create_marble(p(8, 8), red()).unwrap();
        let near_red = board.create_marble(p(0, 5), red()).unwrap();
        let dual = board
            .create_marble(p(5, 5), MarbleColor::dual(Hue::Red, Hue::Blue))
            .unwrap();
        let other = board.create_marble(p(7, 7), blue()).unwrap();

        assert!(board.check_match(p(4, 0)));
        assert!(board.match_has_bomb());
        assert_eq!(board.bombed_marbles(), &[far_red, near_red][..]);
        for id in [far_red, near_red] {
            assert_eq!(board.marble(id).unwrap().state(), MarbleState::Exploding);
        }
        for id in [dual, other] {
            assert_eq!(board.marble(id).unwrap().state(), MarbleState::Default);
        }
        assert_eq!(
            board.take_events(),
            vec![BoardEvent::Matched { has_bomb: true }]
        );

        // 10 for the run, 10 per bombed marble
        assert_eq!(board.score_matches(), 30);
        assert_eq!(board.marbles().len(), 2);
        assert!(board.bombed_marbles().is_empty());
    }

    #[test]
    fn test_bomb_skips_preview_marbles() {
        let mut board = Board::new(5);
        for x in 0..4 {
            board.create_marble(p(x, 0), red()).unwrap();
        }
        board.create_marble(p(4, 0), MarbleColor::BOMB_JOKER).unwrap();
        board.pre_create_random_marbles();
        board.check_match(p(0, 0));
        for marble in board.next_marbles() {
            assert_eq!(marble.state(), MarbleState::PreAdding);
        }
    }

    #[test]
    fn test_random_marbles_fill_preview() {
        let mut board = Board::new(9);
        board.new_game();
        assert_eq!(board.placed_marbles().count(), 3);
        assert_eq!(board.next_marbles().count(), 3);
        for marble in board.placed_marbles() {
            assert_eq!(marble.state(), MarbleState::Adding);
        }
        for marble in board.next_marbles() {
            assert_eq!(marble.state(), MarbleState::PreAdding);
            assert!(!marble.on_board());
        }
        assert!(board.take_events().contains(&BoardEvent::NewMarbles));
        assert_consistent(&board);
    }

    #[test]
    fn test_created_animation_finished_settles() {
        let mut board = Board::new(9);
        board.new_game();
        board.take_events();
        let matched = board.created_animation_finished();
        assert!(!matched);
        for marble in board.placed_marbles() {
            assert_eq!(marble.state(), MarbleState::Default);
        }
        for marble in board.next_marbles() {
            assert_eq!(marble.state(), MarbleState::PreDefault);
        }
    }

    #[test]
    fn test_settled_marble_completes_run() {
        let mut board = Board::new(1);
        for x in 0..4 {
            board.create_marble(p(x, 6), red()).unwrap();
        }
        let id = board.create_marble(p(4, 6), red()).unwrap();
        board.marble_mut(id).unwrap().state = MarbleState::Adding;
        assert!(board.created_animation_finished());
        assert_eq!(
            board.take_events(),
            vec![BoardEvent::Matched { has_bomb: false }]
        );
        assert_eq!(board.score_matches(), 10);
    }

    #[test]
    fn test_preview_reroll_on_taken_cell() {
        let mut board = Board::new(3);
        board.pre_create_random_marbles();
        let reserved: Vec<Position> = board.next_marbles().map(Marble::position).collect();
        board.create_marble(reserved[0], blue()).unwrap();
        board.create_random_marbles();
        assert_eq!(board.placed_marbles().count(), 4);
        assert_consistent(&board);
    }

    #[test]
    fn test_full_board_drops_preview() {
        let mut board = Board::new(3);
        board.pre_create_random_marbles();
        let mut hue = 0;
        for y in 0..9 {
            for x in 0..9 {
                // Alternate hues so no run forms
                let color = MarbleColor::single(Hue::ALL[hue % Hue::ALL.len()]);
                hue += 1;
                board.create_marble(p(x, y), color).unwrap();
            }
        }
        assert!(board.is_full());
        board.take_events();
        board.create_random_marbles();
        let events = board.take_events();
        assert!(!events.contains(&BoardEvent::NewMarbles));
        assert!(matches!(events.first(), Some(BoardEvent::Disposed(ids)) if ids.len() == 3));
        assert_eq!(board.next_marbles().count(), 0);
        assert_eq!(board.marbles().len(), 81);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Board::new(1234);
        let mut b = Board::new(1234);
        for _ in 0..5 {
            a.create_random_marbles();
            b.create_random_marbles();
        }
        let colors = |board: &Board| -> Vec<(Position, MarbleColor)> {
            board
                .marbles()
                .iter()
                .map(|m| (m.position(), m.color()))
                .collect()
        };
        assert_eq!(colors(&a), colors(&b));
        assert_eq!(a.rng_state(), b.rng_state());
    }

    #[test]
    fn test_can_select() {
        let mut board = Board::new(1);
        board.create_marble(p(0, 0), red()).unwrap();
        board.create_marble(p(1, 0), MarbleColor::BOMB_JOKER).unwrap();
        board.create_marble(p(2, 0), MarbleColor::JOKER).unwrap();
        assert!(board.can_select(p(0, 0)));
        assert!(!board.can_select(p(1, 0)));
        assert!(board.can_select(p(2, 0)));
        assert!(!board.can_select(p(3, 0)));
    }

    #[test]
    fn test_find_path_on_board() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(0, 0), red()).unwrap();
        for y in 0..8 {
            board.create_marble(p(4, y), blue()).unwrap();
        }
        let path = board.find_path(id, p(8, 0)).unwrap().unwrap();
        assert_eq!(path.first(), Some(&p(0, 0)));
        assert_eq!(path.last(), Some(&p(8, 0)));
        for cell in &path[1..] {
            assert!(board.marble_at(*cell).is_none());
        }
        assert_eq!(board.find_path(id, p(4, 0)), Ok(None));
        assert_eq!(board.find_path(id, p(0, 0)), Ok(None));
        assert_eq!(
            board.find_path(MarbleId(77), p(1, 1)),
            Err(BoardError::UnknownMarble(MarbleId(77)))
        );
        assert!(!board.path_finder().is_searching());
    }

    #[test]
    fn test_find_path_uses_jump_holes() {
        let mut board = Board::new(1);
        let id = board.create_marble(p(0, 0), red()).unwrap();
        for y in 0..9 {
            board.create_marble(p(4, y), blue()).unwrap();
        }
        assert_eq!(board.find_path(id, p(8, 0)), Ok(None));

        board.jump_holes_mut().add(p(3, 0), p(5, 0));
        let path = board.find_path(id, p(8, 0)).unwrap().unwrap();
        assert!(path.windows(2).any(|w| w[0] == p(3, 0) && w[1] == p(5, 0)));
        assert_eq!(board.grid().cell_cost(p(4, 0)), BLOCKED_CELL_COST);
    }

    #[test]
    fn test_clear_board() {
        let mut board = Board::new(2);
        board.new_game();
        board.clear_board();
        assert!(board.marbles().is_empty());
        assert_eq!(board.next_marbles().count(), 0);
        assert_eq!(board.total_score(), 0);
        assert_eq!(board.free_positions().len(), 81);
    }

    #[test]
    fn oversized_config_is_clamped() {
        let mut board = Board::with_config(BoardConfig {
            width: 100_000,
            height: 100_000,
            preview_count: usize::MAX,
            ..BoardConfig::default()
        });
        assert_eq!(board.width(), BoardConfig::MAX_SIDE);
        assert_eq!(board.height(), BoardConfig::MAX_SIDE);
        board.pre_create_random_marbles();
        assert_eq!(board.next_marbles().count(), BoardConfig::MAX_PREVIEW_COUNT);
    }
}
