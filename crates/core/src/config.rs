//! Board configuration
//!
//! Defaults reproduce the classic 9x9 game. Every field is optional when
//! deserializing, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::types::{PreviewMode, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_SEED, PREVIEW_COUNT};
use marbles_pathfind::PathConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Seed of the board's marble generator
    pub seed: u32,
    /// Size of the preview buffer
    pub preview_count: usize,
    /// Where a front-end shows preview marbles; ignored by the board itself
    pub preview_mode: PreviewMode,
    pub path: PathConfig,
}

impl BoardConfig {
    /// Smallest accepted side length
    pub const MIN_SIDE: i32 = 1;
    /// Largest accepted side length
    pub const MAX_SIDE: i32 = 255;
    /// Largest preview buffer
    pub const MAX_PREVIEW_COUNT: usize = 32;

    /// Copy with dimensions and preview count clamped to a usable grid
    ///
    /// The preview buffer never exceeds the number of cells.
    pub fn normalized(mut self) -> Self {
        self.width = self.width.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        self.height = self.height.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        self.preview_count = self
            .preview_count
            .min(Self::MAX_PREVIEW_COUNT)
            .min(self.cell_count());
        self
    }

    /// Whether every field already lies in its accepted range
    pub fn is_in_range(&self) -> bool {
        *self == self.normalized()
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: DEFAULT_SEED,
            preview_count: PREVIEW_COUNT,
            preview_mode: PreviewMode::default(),
            path: PathConfig::default(),
        }
    }
}
