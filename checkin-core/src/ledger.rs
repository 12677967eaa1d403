//! Storage-facing trait seams
//!
//! The check-in backend keeps four pieces of persisted state:
//! - Settings Store: global feature toggles and daily caps
//! - Action Ledger: append-only check-in/journal records with daily caps
//! - Reward Ledger: cumulative per-user house points
//! - Tile Board: per-user quote-tile unlock state
//!
//! `checkin-db` provides the concrete implementations. Handlers and tests
//! program against these traits.

use async_trait::async_trait;

use crate::error::CheckinResult;
use crate::types::{
    ActionKind, ActionPayload, ActionRecord, ClassTotal, FlipOutcome, HousePoints, HouseTotal,
    SettingEntry, SettingKey, SettingValue, TileStatus, UserId, UserRecord,
};

/// Global settings: feature toggles and daily caps.
///
/// Reads are fail-open by contract: `flag` and `cap` return the
/// documented default on a missing key or a storage error instead of
/// propagating a failure, so a settings outage never blocks check-ins.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Effective value of a feature toggle.
    async fn flag(&self, key: SettingKey) -> bool;

    /// Effective daily cap for an action kind.
    async fn cap(&self, kind: ActionKind) -> u32;

    /// Effective values for every known key, as a per-request snapshot.
    async fn snapshot(&self) -> Vec<SettingEntry>;

    /// Update a setting. Director-only.
    async fn set(
        &self,
        actor: &UserRecord,
        key: SettingKey,
        value: SettingValue,
    ) -> CheckinResult<SettingEntry>;
}

/// Append-only ledger of check-in and journal actions.
#[async_trait]
pub trait ActionLedger: Send + Sync {
    /// Record one action, enforcing the per-student daily cap for its
    /// kind and crediting the reward ledger on success.
    async fn record_action(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        payload: ActionPayload,
    ) -> CheckinResult<ActionRecord>;

    /// Count of same-kind actions by a user on a calendar date
    /// ("YYYY-MM-DD", server-local).
    async fn count_on(&self, user_id: &UserId, kind: ActionKind, date: &str)
        -> CheckinResult<u64>;

    /// Lifetime journal-entry count for a user. Each entry earns one
    /// tile flip.
    async fn journal_count(&self, user_id: &UserId) -> CheckinResult<u64>;

    /// Most recent actions for a user, newest first.
    async fn history(&self, user_id: &UserId, limit: u32) -> CheckinResult<Vec<ActionRecord>>;
}

/// Cumulative house-point ledger.
#[async_trait]
pub trait RewardLedger: Send + Sync {
    /// Credit points to a user's house total.
    ///
    /// Silent no-op unless the user is a house-affiliated student.
    /// Never fails: storage errors are logged and swallowed so a
    /// reward-crediting failure cannot roll back or block the action
    /// that triggered it.
    async fn award(&self, user_id: &UserId, points: i64);

    /// A user's ledger row, if one has been created.
    async fn balance(&self, user_id: &UserId) -> CheckinResult<Option<HousePoints>>;

    /// Point totals grouped by house.
    async fn totals_by_house(&self) -> CheckinResult<Vec<HouseTotal>>;

    /// Point totals grouped by class/grade.
    async fn totals_by_class(&self) -> CheckinResult<Vec<ClassTotal>>;
}

/// Per-user quote-tile unlock cycle.
#[async_trait]
pub trait TileBoard: Send + Sync {
    /// Board snapshot, including earned-flip balance and the computed
    /// `should_reset` flag.
    async fn status(&self, user_id: &UserId) -> CheckinResult<TileStatus>;

    /// Flip one tile, consuming an earned flip and revealing the quote
    /// under the user's rotation cursor.
    async fn flip(&self, user_id: &UserId, tile_index: u8) -> CheckinResult<FlipOutcome>;

    /// Clear the board. Callable at any time; callers typically invoke it
    /// after observing `should_reset`.
    async fn reset(&self, user_id: &UserId) -> CheckinResult<TileStatus>;
}
