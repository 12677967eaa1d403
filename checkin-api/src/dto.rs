//! Data Transfer Objects for API requests and responses

use checkin_core::{SettingEntry, SettingValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Health DTOs ============

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============ User DTOs ============

/// Register user request
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub display_name: String,
    /// Role (student, teacher, director)
    pub role: String,
    /// Class/grade label, e.g. "7B"
    pub class_name: Option<String>,
    /// House affiliation used for point aggregation
    pub house: Option<String>,
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub display_name: String,
    pub role: String,
    pub class_name: Option<String>,
    pub house: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============ Action DTOs ============

/// Check-in request
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub user_id: String,
    /// Mood label, e.g. "happy"
    pub mood: String,
    /// Optional free-text note
    pub note: Option<String>,
}

/// Journal entry request
#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub user_id: String,
    pub content: String,
}

/// Action response
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action_id: String,
    pub user_id: String,
    /// Kind (check_in, journal)
    pub kind: String,
    pub mood: Option<String>,
    pub content: Option<String>,
    /// Server-local calendar date, "YYYY-MM-DD"
    pub action_date: String,
    pub created_at: DateTime<Utc>,
}

// ============ Settings DTOs ============

/// Settings snapshot response
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Vec<SettingEntry>,
}

/// Update setting request
#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    /// User ID of the acting director
    pub actor_id: String,
    /// Setting key, e.g. "max_checkins_per_day"
    pub key: String,
    /// true/false for toggles, 1..=999 for caps
    pub value: SettingValue,
}

// ============ Tile DTOs ============

/// Flip tile request
#[derive(Debug, Deserialize)]
pub struct FlipTileRequest {
    pub user_id: String,
    /// Board slot, 0..=11
    pub tile_index: u8,
}

/// Reset board request
#[derive(Debug, Deserialize)]
pub struct ResetBoardRequest {
    pub user_id: String,
}

/// One flipped tile
#[derive(Debug, Serialize)]
pub struct TileFlipResponse {
    pub tile_index: u8,
    pub quote_index: u8,
    pub flipped_at: DateTime<Utc>,
}

/// Board snapshot response
#[derive(Debug, Serialize)]
pub struct TileStatusResponse {
    pub flipped: Vec<TileFlipResponse>,
    pub available_flips: u64,
    pub next_quote_index: u8,
    pub reset_at: Option<DateTime<Utc>>,
    pub should_reset: bool,
}

/// Flip outcome response
#[derive(Debug, Serialize)]
pub struct FlipResponse {
    pub tile_index: u8,
    pub quote: QuoteResponse,
    pub status: TileStatusResponse,
}

// ============ Quote DTOs ============

/// Quote response
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_index: u8,
    pub text: String,
    pub author: Option<String>,
}

/// Update quote request (director-only)
#[derive(Debug, Deserialize)]
pub struct UpdateQuoteRequest {
    /// User ID of the acting director
    pub actor_id: String,
    pub text: String,
    pub author: Option<String>,
}

// ============ Reward DTOs ============

/// Manual bonus award request (staff only)
#[derive(Debug, Deserialize)]
pub struct AwardPointsRequest {
    /// User ID of the acting staff member
    pub actor_id: String,
    /// Student to credit
    pub user_id: String,
    pub points: i64,
}

/// Point balance response
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: String,
    pub house: Option<String>,
    /// Zero when no ledger row exists yet
    pub total: i64,
}

// ============ Analytics DTOs ============

/// House leaderboard entry
#[derive(Debug, Serialize)]
pub struct HousePointsResponse {
    pub house: String,
    pub points: i64,
}

/// Class leaderboard entry
#[derive(Debug, Serialize)]
pub struct ClassPointsResponse {
    pub class_name: String,
    pub points: i64,
}

/// Daily activity breakdown
#[derive(Debug, Serialize)]
pub struct DailyBreakdownResponse {
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    pub moods: Vec<MoodCountResponse>,
    pub checkins_by_class: Vec<ClassCountResponse>,
    pub journals_by_class: Vec<ClassCountResponse>,
}

#[derive(Debug, Serialize)]
pub struct MoodCountResponse {
    pub mood: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ClassCountResponse {
    pub class_name: String,
    pub count: u64,
}

// ============ Message DTOs ============

/// Send message request
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
}

/// Mark message read request
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub user_id: String,
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

// ============ Admin DTOs ============

/// Bulk purge request (director-only)
#[derive(Debug, Deserialize)]
pub struct PurgeRequest {
    /// User ID of the acting director
    pub actor_id: String,
    /// Role whose accounts to purge
    pub role: String,
}

/// Purge response
#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub role: String,
    pub users_removed: u64,
}

/// Role override request (director-only)
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    /// User ID of the acting director
    pub actor_id: String,
    pub user_id: String,
    pub role: String,
}
