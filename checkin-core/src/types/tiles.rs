//! Quote-tile board types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fixed quote from the 50-entry rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Position in the rotation, 0..=49.
    pub quote_index: u8,
    pub text: String,
    pub author: Option<String>,
}

/// One flipped tile on a user's board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileFlip {
    /// Board slot, 0..=11. Unique per user.
    pub tile_index: u8,
    /// Rotation index of the quote this flip revealed.
    pub quote_index: u8,
    pub flipped_at: DateTime<Utc>,
}

/// Snapshot of a user's board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileStatus {
    pub flipped: Vec<TileFlip>,
    /// Earned flips not yet spent: max(0, journal entries - flips).
    /// Unused flips accumulate across days.
    pub available_flips: u64,
    /// Rotation index the next flip will reveal.
    pub next_quote_index: u8,
    /// Set when the board reached 12/12 and the cooldown began, or when
    /// the board was last reset.
    pub reset_at: Option<DateTime<Utc>>,
    /// True once a completed board's 24-hour cooldown has elapsed.
    /// Computed at query time; observing it never mutates state. Callers
    /// decide when to invoke the explicit reset.
    pub should_reset: bool,
}

impl TileStatus {
    pub fn flipped_count(&self) -> usize {
        self.flipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.flipped.len() == crate::constants::TILE_COUNT
    }
}

/// Result of a successful flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipOutcome {
    pub tile_index: u8,
    pub quote: Quote,
    pub status: TileStatus,
}
