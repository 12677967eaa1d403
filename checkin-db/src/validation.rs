//! Input validation rules
//!
//! Small field validators shared by the services. Each returns a
//! `CheckinError::Validation` with a message fit for direct display.

use checkin_core::{
    ActionKind, ActionPayload, CheckinError, CheckinResult, MAX_DAILY_CAP, MAX_JOURNAL_LEN,
    MAX_MESSAGE_LEN, MAX_MOOD_LEN, MIN_DAILY_CAP, TILE_COUNT,
};

/// Validate the payload fields required for an action kind.
///
/// A check-in must carry a mood; a journal entry must carry non-empty
/// content.
pub fn validate_payload(kind: ActionKind, payload: &ActionPayload) -> CheckinResult<()> {
    match kind {
        ActionKind::CheckIn => {
            let mood = payload
                .mood
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if mood.is_empty() {
                return Err(CheckinError::Validation(
                    "A check-in needs a mood.".to_string(),
                ));
            }
            if mood.chars().count() > MAX_MOOD_LEN {
                return Err(CheckinError::Validation(format!(
                    "Mood must be at most {} characters.",
                    MAX_MOOD_LEN
                )));
            }
        }
        ActionKind::Journal => {
            let content = payload
                .content
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if content.is_empty() {
                return Err(CheckinError::Validation(
                    "A journal entry needs some content.".to_string(),
                ));
            }
            if content.chars().count() > MAX_JOURNAL_LEN {
                return Err(CheckinError::Validation(format!(
                    "Journal entries are limited to {} characters.",
                    MAX_JOURNAL_LEN
                )));
            }
        }
    }
    Ok(())
}

/// Validate a tile index against the 12-slot board.
pub fn validate_tile_index(tile_index: u8) -> CheckinResult<()> {
    if usize::from(tile_index) >= TILE_COUNT {
        return Err(CheckinError::Validation(format!(
            "Tile index must be between 0 and {}.",
            TILE_COUNT - 1
        )));
    }
    Ok(())
}

/// Validate a daily cap value into the allowed range.
pub fn validate_cap(value: u32) -> CheckinResult<u32> {
    if !(MIN_DAILY_CAP..=MAX_DAILY_CAP).contains(&value) {
        return Err(CheckinError::Validation(format!(
            "Daily caps must be between {} and {}.",
            MIN_DAILY_CAP, MAX_DAILY_CAP
        )));
    }
    Ok(value)
}

/// Validate a display name.
pub fn validate_display_name(name: &str) -> CheckinResult<()> {
    if name.trim().is_empty() {
        return Err(CheckinError::Validation(
            "Display name must not be empty.".to_string(),
        ));
    }
    Ok(())
}

/// Validate a message body.
pub fn validate_message_body(body: &str) -> CheckinResult<()> {
    let body = body.trim();
    if body.is_empty() {
        return Err(CheckinError::Validation(
            "Message body must not be empty.".to_string(),
        ));
    }
    if body.chars().count() > MAX_MESSAGE_LEN {
        return Err(CheckinError::Validation(format!(
            "Messages are limited to {} characters.",
            MAX_MESSAGE_LEN
        )));
    }
    Ok(())
}

/// Treat blank optional fields as absent.
pub fn normalize_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
