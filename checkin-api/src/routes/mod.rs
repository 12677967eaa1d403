//! API route handlers

pub mod actions;
pub mod admin;
pub mod analytics;
pub mod health;
pub mod messages;
pub mod quotes;
pub mod rewards;
pub mod settings;
pub mod tiles;
pub mod users;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // User endpoints
        .route("/users", post(users::register_user))
        .route("/users/:user_id", get(users::get_user))
        // Action endpoints
        .route("/checkins", post(actions::submit_checkin))
        .route("/journals", post(actions::submit_journal))
        .route("/actions/:user_id", get(actions::get_history))
        // Tile board endpoints
        .route("/tiles/:user_id", get(tiles::get_status))
        .route("/tiles/flip", post(tiles::flip_tile))
        .route("/tiles/reset", post(tiles::reset_board))
        // Reward endpoints
        .route("/rewards", post(rewards::award_points))
        .route("/rewards/:user_id", get(rewards::get_balance))
        // Settings endpoints
        .route("/settings", get(settings::get_settings).post(settings::update_setting))
        // Quote endpoints
        .route("/quotes", get(quotes::list_quotes))
        .route("/quotes/:quote_index", post(quotes::update_quote))
        // Analytics endpoints
        .route("/analytics/houses", get(analytics::house_totals))
        .route("/analytics/classes", get(analytics::class_totals))
        .route("/analytics/daily", get(analytics::daily_breakdown))
        // Message endpoints
        .route("/messages", post(messages::send_message))
        .route("/messages/:user_id", get(messages::get_inbox))
        .route("/messages/:message_id/read", post(messages::mark_read))
        // Admin endpoints
        .route("/admin/purge", post(admin::purge_role))
        .route("/admin/role", post(admin::set_role))
        // State
        .with_state(state)
}
