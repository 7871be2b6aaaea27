//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the board engine, the
//! pathfinder and any presentation layer sitting on top of them. All types are
//! plain data; the only dependency is `serde` so snapshots and configs can be
//! written out by front-ends.
//!
//! # Board Dimensions
//!
//! The default playfield is a 9x9 square:
//!
//! - **Width**: 9 columns (indexed 0-8)
//! - **Height**: 9 rows (indexed 0-8)
//! - Coordinates are `(x, y)`, `x` left to right, `y` top to bottom
//!
//! # Rules Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 5 | Marbles needed in one line for a match |
//! | `PREVIEW_COUNT` | 3 | Marbles generated ahead of placement |
//! | `RUN_BASE_SCORE` | 10 | Points for a matched line of exactly `MIN_RUN` |
//! | `EXTRA_MARBLE_SCORE` | 10 | Points for every marble beyond `MIN_RUN` |
//! | `BOMBED_MARBLE_SCORE` | 10 | Points for every marble cleared by a bomb |
//!
//! # Pathfinding Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FREE_CELL_COST` | 10 | Traversal cost of an empty cell |
//! | `BLOCKED_CELL_COST` | 65535 | Sentinel cost of an occupied cell |
//! | `JUMP_COST` | 10 | Surcharge for a non-adjacent (jump hole) step |
//! | `MIN_CELL_COST` | 10 | Heuristic scale per Manhattan step |
//! | `SEARCH_BUDGET_SECS` | 10 | Wall-clock budget of one search |
//! | `SEARCH_CHECK_INTERVAL` | 100000 | Iterations between budget checks |
//!
//! # Examples
//!
//! ```
//! use marbles_types::{Hue, MarbleColor, Position};
//!
//! let red = MarbleColor::single(Hue::Red);
//! let red_green = MarbleColor::dual(Hue::Red, Hue::Green);
//! assert!(red.regular_colors().intersects(red_green.regular_colors()));
//!
//! let (c1, c2) = red_green.components();
//! assert_eq!(c1, MarbleColor::single(Hue::Red));
//! assert_eq!(c2, MarbleColor::single(Hue::Green));
//!
//! assert_eq!(Position::new(1, 2).manhattan(Position::new(4, 0)), 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board width in cells (9 columns)
pub const BOARD_WIDTH: i32 = 9;

/// Board height in cells (9 rows)
pub const BOARD_HEIGHT: i32 = 9;

/// Number of marbles generated ahead of placement
pub const PREVIEW_COUNT: usize = 3;

/// Minimum line length that counts as a match
pub const MIN_RUN: usize = 5;

/// Score of a matched line with exactly `MIN_RUN` marbles
pub const RUN_BASE_SCORE: u32 = 10;

/// Score added per marble beyond `MIN_RUN` in one line
pub const EXTRA_MARBLE_SCORE: u32 = 10;

/// Score per marble removed by a bomb effect
pub const BOMBED_MARBLE_SCORE: u32 = 10;

/// Seed used when none is given
pub const DEFAULT_SEED: u32 = 9;

/// Traversal cost of an empty cell
pub const FREE_CELL_COST: u16 = 10;

/// Traversal cost of an occupied cell; never traversable
pub const BLOCKED_CELL_COST: u16 = u16::MAX;

/// Surcharge for a step between non-adjacent cells
pub const JUMP_COST: u32 = 10;

/// Lowest cost a single step can have; scales the heuristic
pub const MIN_CELL_COST: u32 = 10;

/// Wall-clock budget of a single path search, in seconds
pub const SEARCH_BUDGET_SECS: u64 = 10;

/// Iterations between two checks of the search budget
pub const SEARCH_CHECK_INTERVAL: u32 = 100_000;

/// A cell coordinate on the board
///
/// Coordinates are signed so that neighbour offsets can be computed freely;
/// lookups outside the grid simply return nothing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` is one orthogonal step away
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// The seven base hues a marble can carry
///
/// Declaration order matters: it is the enumeration order used when picking a
/// random hue and when breaking ties for a match's primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hue {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    White,
    Cyan,
}

impl Hue {
    /// All hues in declaration order
    pub const ALL: [Hue; 7] = [
        Hue::Red,
        Hue::Green,
        Hue::Blue,
        Hue::Yellow,
        Hue::Orange,
        Hue::White,
        Hue::Cyan,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Single-letter code used by text renderers and snapshots
    pub fn symbol(self) -> char {
        match self {
            Hue::Red => 'r',
            Hue::Green => 'g',
            Hue::Blue => 'b',
            Hue::Yellow => 'y',
            Hue::Orange => 'o',
            Hue::White => 'w',
            Hue::Cyan => 'c',
        }
    }

    /// Parse a hue from its name or symbol (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use marbles_types::Hue;
    ///
    /// assert_eq!(Hue::from_name("red"), Some(Hue::Red));
    /// assert_eq!(Hue::from_name("C"), Some(Hue::Cyan));
    /// assert_eq!(Hue::from_name("purple"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(Hue::Red),
            "green" | "g" => Some(Hue::Green),
            "blue" | "b" => Some(Hue::Blue),
            "yellow" | "y" => Some(Hue::Yellow),
            "orange" | "o" => Some(Hue::Orange),
            "white" | "w" => Some(Hue::White),
            "cyan" | "c" => Some(Hue::Cyan),
            _ => None,
        }
    }
}

/// A set of base hues stored as a 7-bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HueSet(u8);

impl HueSet {
    pub const EMPTY: HueSet = HueSet(0);
    pub const ALL: HueSet = HueSet(0b0111_1111);

    pub const fn single(hue: Hue) -> Self {
        Self(hue.bit())
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, hue: Hue) {
        self.0 |= hue.bit();
    }

    pub fn contains(self, hue: Hue) -> bool {
        self.0 & hue.bit() != 0
    }

    pub fn union(self, other: HueSet) -> HueSet {
        HueSet(self.0 | other.0)
    }

    pub fn intersection(self, other: HueSet) -> HueSet {
        HueSet(self.0 & other.0)
    }

    pub fn intersects(self, other: HueSet) -> bool {
        !self.intersection(other).is_empty()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Member hues in declaration order
    pub fn iter(self) -> impl Iterator<Item = Hue> {
        Hue::ALL.into_iter().filter(move |h| self.contains(*h))
    }
}

impl FromIterator<Hue> for HueSet {
    fn from_iter<I: IntoIterator<Item = Hue>>(iter: I) -> Self {
        let mut set = HueSet::EMPTY;
        for hue in iter {
            set.insert(hue);
        }
        set
    }
}

/// The color of a marble
///
/// A color is a set of regular hues plus two independent flags:
///
/// - **single**: one hue
/// - **dual**: exactly two hues, bridging runs of either hue
/// - **joker**: every hue, flagged `joker`
/// - **bomb-joker**: a joker that also carries the `bomb` flag
/// - **bomb**: the bare bomb marker with no regular hue
///
/// Keeping the special markers out of the hue mask means extending the palette
/// can never alias a special value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarbleColor {
    hues: HueSet,
    joker: bool,
    bomb: bool,
}

impl MarbleColor {
    /// Compatible with every hued marble
    pub const JOKER: MarbleColor = MarbleColor {
        hues: HueSet::ALL,
        joker: true,
        bomb: false,
    };

    /// A joker that triggers the bomb effect when matched
    pub const BOMB_JOKER: MarbleColor = MarbleColor {
        hues: HueSet::ALL,
        joker: true,
        bomb: true,
    };

    /// Bare bomb marker without any hue
    pub const BOMB: MarbleColor = MarbleColor {
        hues: HueSet::EMPTY,
        joker: false,
        bomb: true,
    };

    pub const fn single(hue: Hue) -> Self {
        Self {
            hues: HueSet::single(hue),
            joker: false,
            bomb: false,
        }
    }

    /// Union of two hues; collapses to a single hue when both are the same
    pub fn dual(a: Hue, b: Hue) -> Self {
        Self {
            hues: HueSet::single(a).union(HueSet::single(b)),
            joker: false,
            bomb: false,
        }
    }

    /// Union of two colors (hues and flags)
    pub fn union(self, other: MarbleColor) -> Self {
        Self {
            hues: self.hues.union(other.hues),
            joker: self.joker || other.joker,
            bomb: self.bomb || other.bomb,
        }
    }

    /// The regular hue decomposition, never containing a special marker
    pub fn regular_colors(self) -> HueSet {
        self.hues
    }

    pub fn is_joker(self) -> bool {
        self.joker
    }

    pub fn is_bomb(self) -> bool {
        self.bomb
    }

    pub fn is_bomb_joker(self) -> bool {
        self.joker && self.bomb
    }

    /// Whether this is a two-hue marble
    pub fn is_dual(self) -> bool {
        !self.joker && self.hues.len() == 2
    }

    /// Split into the two display colors of a marble
    ///
    /// A dual marble yields its two hues in declaration order; every other
    /// color yields itself twice.
    pub fn components(self) -> (MarbleColor, MarbleColor) {
        if self.hues.len() == 2 {
            let mut iter = self.hues.iter();
            if let (Some(a), Some(b)) = (iter.next(), iter.next()) {
                return (MarbleColor::single(a), MarbleColor::single(b));
            }
        }
        (self, self)
    }

    /// Compact numeric encoding: hue bits, bomb at bit 7, joker at bit 8
    pub fn to_bits(self) -> u16 {
        self.hues.bits() as u16 | (self.bomb as u16) << 7 | (self.joker as u16) << 8
    }

    pub fn from_bits(bits: u16) -> Self {
        Self {
            hues: HueSet::from_bits((bits & 0x7f) as u8),
            bomb: bits & (1 << 7) != 0,
            joker: bits & (1 << 8) != 0,
        }
    }
}

impl From<Hue> for MarbleColor {
    fn from(hue: Hue) -> Self {
        MarbleColor::single(hue)
    }
}

impl fmt::Display for MarbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bomb_joker() {
            return f.write_str("bomb-joker");
        }
        if self.joker {
            return f.write_str("joker");
        }
        if self.bomb && self.hues.is_empty() {
            return f.write_str("bomb");
        }
        for (i, hue) in self.hues.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{:?}", hue)?;
        }
        Ok(())
    }
}

/// Lifecycle state of a marble
///
/// ```text
/// PreAdding -> PreDefault            (preview marble, batch placed)
/// PreAdding/PreDefault -> Adding     (placed on the board)
/// Adding -> Default                  (spawn animation finished)
/// Default -> Removing | Exploding    (matched or bombed; terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarbleState {
    #[default]
    Default,
    Adding,
    Removing,
    Exploding,
    PreAdding,
    PreDefault,
}

impl MarbleState {
    /// Terminal states waiting for disposal
    pub fn is_removed(self) -> bool {
        matches!(self, MarbleState::Removing | MarbleState::Exploding)
    }

    /// States of a marble still in the lookahead buffer
    pub fn is_preview(self) -> bool {
        matches!(self, MarbleState::PreAdding | MarbleState::PreDefault)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarbleState::Default => "default",
            MarbleState::Adding => "adding",
            MarbleState::Removing => "removing",
            MarbleState::Exploding => "exploding",
            MarbleState::PreAdding => "pre_adding",
            MarbleState::PreDefault => "pre_default",
        }
    }
}

/// Movement region of a cell
///
/// Only one region exists today; searches still filter on an allow-list of
/// regions so that further regions can be introduced without touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Default,
}

/// Where preview marbles are shown by a front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    None,
    Board,
    #[default]
    Side,
}
