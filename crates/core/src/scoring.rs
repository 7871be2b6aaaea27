//! Scoring module - points for one move
//!
//! | Part | Points |
//! |------|--------|
//! | matched run of `MIN_RUN` | `RUN_BASE_SCORE` |
//! | each marble beyond `MIN_RUN` in a run | `EXTRA_MARBLE_SCORE` |
//! | several runs in one move | run sum multiplied by the run count |
//! | each bombed marble | `BOMBED_MARBLE_SCORE` |

use crate::types::{BOMBED_MARBLE_SCORE, EXTRA_MARBLE_SCORE, MIN_RUN, RUN_BASE_SCORE};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Matched runs in the move
    pub runs: u32,
    /// Run points after the multi-run multiplier
    pub run_score: u32,
    /// Points for bombed marbles
    pub bomb_score: u32,
    pub total: u32,
}

/// Points for a single run of `len` marbles
pub fn calculate_run_score(len: usize) -> u32 {
    if len < MIN_RUN {
        return 0;
    }
    RUN_BASE_SCORE + EXTRA_MARBLE_SCORE * (len - MIN_RUN) as u32
}

/// Points for one move given its run lengths and bombed marble count
pub fn calculate_score<I>(run_lengths: I, bombed: usize) -> ScoreResult
where
    I: IntoIterator<Item = usize>,
{
    let mut runs = 0u32;
    let mut sum = 0u32;
    for len in run_lengths {
        runs += 1;
        sum = sum.saturating_add(calculate_run_score(len));
    }
    let run_score = sum.saturating_mul(runs);
    let bomb_score = BOMBED_MARBLE_SCORE.saturating_mul(bombed as u32);
    ScoreResult {
        runs,
        run_score,
        bomb_score,
        total: run_score.saturating_add(bomb_score),
    }
}
