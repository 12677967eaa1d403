//! Quote-tile board service
//!
//! Each user has a 12-tile board. Journal entries earn flips; a flip
//! reveals the quote under the user's rotation cursor and advances the
//! cursor mod 50. Completing the board stamps a 24-hour cooldown, after
//! which the caller may reset and keep cycling.

use std::sync::Arc;

use async_trait::async_trait;
use checkin_core::{
    ActionLedger, CheckinError, CheckinResult, FlipOutcome, RewardLedger, SettingKey,
    SettingsProvider, TileBoard, TileStatus, UserId, FLIP_POINTS, QUOTE_CYCLE_LEN,
    RESET_COOLDOWN_HOURS, TILE_COUNT,
};
use chrono::{DateTime, Duration, Utc};
use surrealdb::sql::Datetime;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, TileCycleEntity, TileFlipEntity};
use crate::error::StoreError;
use crate::services::{ActionService, QuoteService, RewardService, SettingsService, UserService};
use crate::validation::validate_tile_index;

/// Tile board backed by the `tile_flip` and `tile_cycle` tables.
pub struct TileService {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
    settings: Arc<SettingsService>,
    actions: Arc<ActionService>,
    rewards: Arc<RewardService>,
    quotes: Arc<QuoteService>,
}

impl TileService {
    pub fn new(
        datastore: Arc<SurrealDatastore>,
        users: Arc<UserService>,
        settings: Arc<SettingsService>,
        actions: Arc<ActionService>,
        rewards: Arc<RewardService>,
        quotes: Arc<QuoteService>,
    ) -> Self {
        Self {
            datastore,
            users,
            settings,
            actions,
            rewards,
            quotes,
        }
    }

    async fn flips(&self, user_id: &UserId) -> CheckinResult<Vec<TileFlipEntity>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE user_id = $user_id ORDER BY tile_index",
                TileFlipEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<TileFlipEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities)
    }

    async fn cycle(&self, user_id: &UserId) -> CheckinResult<Option<TileCycleEntity>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE user_id = $user_id LIMIT 1",
                TileCycleEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<TileCycleEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities.into_iter().next())
    }

    fn cooldown_elapsed(reset_at: Option<DateTime<Utc>>) -> bool {
        reset_at.is_some_and(|t| Utc::now() >= t + Duration::hours(RESET_COOLDOWN_HOURS))
    }

    fn build_status(
        flips: Vec<TileFlipEntity>,
        cycle: Option<&TileCycleEntity>,
        journal_count: u64,
    ) -> TileStatus {
        let flipped: Vec<_> = flips.into_iter().map(TileFlipEntity::into_flip).collect();
        let available_flips = journal_count.saturating_sub(flipped.len() as u64);
        let next_quote_index = cycle.map(|c| c.next_quote_index).unwrap_or(0);
        let reset_at: Option<DateTime<Utc>> =
            cycle.and_then(|c| c.reset_at.clone()).map(Into::into);
        let should_reset = flipped.len() == TILE_COUNT && Self::cooldown_elapsed(reset_at);

        TileStatus {
            flipped,
            available_flips,
            next_quote_index,
            reset_at,
            should_reset,
        }
    }

    /// Persist the cursor row after a flip, stamping the cooldown start
    /// when this flip completed the board.
    async fn store_cycle(
        &self,
        user_id: &UserId,
        existing: bool,
        next_quote_index: u8,
        completed: bool,
    ) -> CheckinResult<()> {
        if existing {
            let statement = if completed {
                format!(
                    "UPDATE {} SET next_quote_index = $next, reset_at = $now, updated_at = $now \
                     WHERE user_id = $user_id RETURN NONE",
                    TileCycleEntity::TABLE
                )
            } else {
                format!(
                    "UPDATE {} SET next_quote_index = $next, updated_at = $now \
                     WHERE user_id = $user_id RETURN NONE",
                    TileCycleEntity::TABLE
                )
            };

            self.datastore
                .client()
                .query(statement)
                .bind(("user_id", user_id.0.clone()))
                .bind(("next", i64::from(next_quote_index)))
                .bind(("now", Datetime::from(Utc::now())))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        } else {
            let mut entity = TileCycleEntity::new(user_id.0.clone(), next_quote_index);
            if completed {
                entity.reset_at = Some(Utc::now().into());
            }

            self.datastore
                .client()
                .query(format!(
                    "CREATE {} CONTENT $data RETURN NONE",
                    TileCycleEntity::TABLE
                ))
                .bind(("data", entity))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl TileBoard for TileService {
    async fn status(&self, user_id: &UserId) -> CheckinResult<TileStatus> {
        self.users.require(user_id).await?;

        let flips = self.flips(user_id).await?;
        let cycle = self.cycle(user_id).await?;
        let journal_count = self.actions.journal_count(user_id).await?;

        Ok(Self::build_status(flips, cycle.as_ref(), journal_count))
    }

    async fn flip(&self, user_id: &UserId, tile_index: u8) -> CheckinResult<FlipOutcome> {
        validate_tile_index(tile_index)?;
        self.users.require(user_id).await?;

        if !self.settings.flag(SettingKey::QuoteBoardEnabled).await {
            return Err(CheckinError::Validation(
                "The quote board is currently disabled.".to_string(),
            ));
        }

        let flips = self.flips(user_id).await?;
        if flips.iter().any(|f| f.tile_index == tile_index) {
            return Err(CheckinError::AlreadyFlipped(tile_index));
        }

        // A flip must be earned by a prior journal entry; unused flips
        // carry over across days.
        let journal_count = self.actions.journal_count(user_id).await?;
        let available = journal_count.saturating_sub(flips.len() as u64);
        if available == 0 {
            return Err(CheckinError::NoFlipsAvailable);
        }

        let cycle = self.cycle(user_id).await?;
        let quote_index = cycle.as_ref().map(|c| c.next_quote_index).unwrap_or(0);
        let next_quote_index = (quote_index + 1) % QUOTE_CYCLE_LEN;

        let quote = self.quotes.get(quote_index).await?;

        // The (user, tile) unique index turns a lost race into the
        // duplicate error rather than a double flip.
        let flip_entity = TileFlipEntity::new(user_id.0.clone(), tile_index, quote_index);
        self.datastore
            .client()
            .query(format!(
                "CREATE {} CONTENT $data RETURN NONE",
                TileFlipEntity::TABLE
            ))
            .bind(("data", flip_entity.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("idx_flip_user_tile") {
                    CheckinError::AlreadyFlipped(tile_index)
                } else {
                    StoreError::Query(msg).into()
                }
            })?;

        let flipped_count = flips.len() + 1;
        let completed = flipped_count == TILE_COUNT;

        self.store_cycle(user_id, cycle.is_some(), next_quote_index, completed)
            .await?;

        self.rewards.award(user_id, FLIP_POINTS).await;

        tracing::info!(
            user_id = %user_id,
            tile_index,
            quote_index,
            completed,
            "Tile flipped"
        );

        let mut all_flips = flips;
        all_flips.push(flip_entity);

        let reset_at = if completed {
            Some(Utc::now())
        } else {
            cycle.as_ref().and_then(|c| c.reset_at.clone()).map(Into::into)
        };

        let status = TileStatus {
            flipped: all_flips
                .into_iter()
                .map(TileFlipEntity::into_flip)
                .collect(),
            available_flips: journal_count.saturating_sub(flipped_count as u64),
            next_quote_index,
            reset_at,
            // The cooldown starts now at the earliest; it can never have
            // elapsed in the same call that completed the board.
            should_reset: false,
        };

        Ok(FlipOutcome {
            tile_index,
            quote,
            status,
        })
    }

    async fn reset(&self, user_id: &UserId) -> CheckinResult<TileStatus> {
        self.users.require(user_id).await?;

        let flips = self.flips(user_id).await?;
        let cycle = self.cycle(user_id).await?;

        // A reset taken after a completed board's cooldown continues the
        // rotation from the persisted cursor; a mid-cycle reset starts
        // the next round from quote 0.
        let board_complete = flips.len() == TILE_COUNT;
        let cooldown_elapsed = Self::cooldown_elapsed(
            cycle.as_ref().and_then(|c| c.reset_at.clone()).map(Into::into),
        );
        let next_quote_index = if board_complete && cooldown_elapsed {
            cycle.as_ref().map(|c| c.next_quote_index).unwrap_or(0)
        } else {
            0
        };

        self.datastore
            .client()
            .query(format!(
                "DELETE {} WHERE user_id = $user_id",
                TileFlipEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if cycle.is_some() {
            self.datastore
                .client()
                .query(format!(
                    "UPDATE {} SET next_quote_index = $next, reset_at = $now, updated_at = $now \
                     WHERE user_id = $user_id RETURN NONE",
                    TileCycleEntity::TABLE
                ))
                .bind(("user_id", user_id.0.clone()))
                .bind(("next", i64::from(next_quote_index)))
                .bind(("now", Datetime::from(Utc::now())))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        } else {
            let mut entity = TileCycleEntity::new(user_id.0.clone(), next_quote_index);
            entity.reset_at = Some(Utc::now().into());

            self.datastore
                .client()
                .query(format!(
                    "CREATE {} CONTENT $data RETURN NONE",
                    TileCycleEntity::TABLE
                ))
                .bind(("data", entity))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        tracing::info!(user_id = %user_id, next_quote_index, "Board reset");

        let journal_count = self.actions.journal_count(user_id).await?;

        Ok(TileStatus {
            flipped: Vec::new(),
            available_flips: journal_count,
            next_quote_index,
            reset_at: Some(Utc::now()),
            should_reset: false,
        })
    }
}
