//! Tile flip and tile cycle entities

use checkin_core::TileFlip;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use super::Entity;

/// One revealed tile on a user's board.
///
/// The (user_id, tile_index) pair is unique at the storage level, so a
/// tile can never be flipped twice even if two requests race past the
/// in-service check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileFlipEntity {
    pub user_id: String,
    /// Board slot, 0..=11
    pub tile_index: u8,
    /// Rotation index of the revealed quote, 0..=49
    pub quote_index: u8,
    pub flipped_at: Datetime,
}

impl Entity for TileFlipEntity {
    const TABLE: &'static str = "tile_flip";
}

impl TileFlipEntity {
    pub fn new(user_id: String, tile_index: u8, quote_index: u8) -> Self {
        Self {
            user_id,
            tile_index,
            quote_index,
            flipped_at: Utc::now().into(),
        }
    }

    pub fn into_flip(self) -> TileFlip {
        TileFlip {
            tile_index: self.tile_index,
            quote_index: self.quote_index,
            flipped_at: self.flipped_at.into(),
        }
    }
}

/// Per-user quote-rotation cursor, one row per user.
///
/// Created on the first flip with the cursor already advanced past the
/// issued quote. `reset_at` records when a completed board's cooldown
/// began, or when the board was last reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileCycleEntity {
    pub user_id: String,
    /// Rotation index the next flip will reveal, 0..=49
    pub next_quote_index: u8,
    pub reset_at: Option<Datetime>,
    pub updated_at: Datetime,
}

impl Entity for TileCycleEntity {
    const TABLE: &'static str = "tile_cycle";
}

impl TileCycleEntity {
    pub fn new(user_id: String, next_quote_index: u8) -> Self {
        Self {
            user_id,
            next_quote_index,
            reset_at: None,
            updated_at: Utc::now().into(),
        }
    }
}
