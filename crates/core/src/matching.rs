//! Match detection - runs of compatible marbles along a line
//!
//! Two marbles are compatible when their colors are equal or their regular
//! hue sets intersect. A run is grown from an origin cell outward, first in
//! the positive step direction, then in the negative one; a marble joins only
//! if it is compatible with every marble already in the run. Growth stops at
//! the first empty cell, incompatible marble or grid edge.
//!
//! | Direction | Step |
//! |-----------|------|
//! | horizontal | `(1, 0)` |
//! | vertical | `(0, 1)` |
//! | diagonal | `(1, 1)` |
//! | anti-diagonal | `(1, -1)` |

use crate::grid::Grid;
use crate::marble::MarbleId;
use crate::types::{Hue, MarbleColor, Position, MIN_RUN};

/// Line directions checked through a match origin, in check order
pub const LINE_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Whether two marble colors can sit in one run
///
/// Symmetric and reflexive. A joker shares a hue with every hued color, and a
/// dual color bridges runs of either of its hues.
pub fn compatible(a: MarbleColor, b: MarbleColor) -> bool {
    a == b || a.regular_colors().intersects(b.regular_colors())
}

/// The hue carried by the most colors; ties go to the earlier declared hue
///
/// Returns `None` when no color carries a regular hue.
pub fn primary_hue<I>(colors: I) -> Option<Hue>
where
    I: IntoIterator<Item = MarbleColor>,
{
    let mut counts = [0usize; Hue::ALL.len()];
    for color in colors {
        let hues = color.regular_colors();
        for (i, hue) in Hue::ALL.iter().enumerate() {
            if hues.contains(*hue) {
                counts[i] += 1;
            }
        }
    }
    let mut best: Option<(Hue, usize)> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((Hue::ALL[i], count));
        }
    }
    best.map(|(hue, _)| hue)
}

/// A matched line of at least [`MIN_RUN`] marbles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRun {
    direction: (i32, i32),
    /// Positive-side marbles, then negative-side marbles, then the origin
    marbles: Vec<MarbleId>,
    primary: Option<Hue>,
    has_bomb: bool,
}

impl MatchRun {
    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    pub fn marbles(&self) -> &[MarbleId] {
        &self.marbles
    }

    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    pub fn contains(&self, id: MarbleId) -> bool {
        self.marbles.contains(&id)
    }

    /// Hue counted most often across the run
    pub fn primary_color(&self) -> Option<Hue> {
        self.primary
    }

    /// Whether a bomb-joker is part of the run
    pub fn has_bomb(&self) -> bool {
        self.has_bomb
    }
}

/// Grow the run through `origin` along `step`
///
/// `color_of` resolves the marbles found on the grid. Returns `None` when the
/// origin is empty or the run is shorter than [`MIN_RUN`].
pub fn scan_line<F>(
    grid: &Grid,
    origin: Position,
    step: (i32, i32),
    color_of: F,
) -> Option<MatchRun>
where
    F: Fn(MarbleId) -> Option<MarbleColor>,
{
    let origin_id = grid.get(origin)?;
    let origin_color = color_of(origin_id)?;

    let mut marbles = Vec::new();
    let mut colors = vec![origin_color];
    for (dx, dy) in [step, (-step.0, -step.1)] {
        let mut pos = origin.offset(dx, dy);
        while let Some(id) = grid.get(pos) {
            let Some(color) = color_of(id) else {
                break;
            };
            if !colors.iter().all(|&c| compatible(c, color)) {
                break;
            }
            marbles.push(id);
            colors.push(color);
            pos = pos.offset(dx, dy);
        }
    }
    marbles.push(origin_id);

    if marbles.len() < MIN_RUN {
        return None;
    }
    Some(MatchRun {
        direction: step,
        has_bomb: colors.iter().any(|c| c.is_bomb_joker()),
        primary: primary_hue(colors),
        marbles,
    })
}
