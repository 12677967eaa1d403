//! Quote-tile board endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use checkin_core::{TileBoard, TileStatus, UserId};

use crate::dto::{
    FlipResponse, FlipTileRequest, ResetBoardRequest, TileFlipResponse, TileStatusResponse,
};
use crate::error::ApiResult;
use crate::routes::quotes::quote_to_response;
use crate::state::AppState;

/// Get a user's board snapshot
pub async fn get_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<TileStatusResponse>> {
    let status = state.tiles.status(&UserId(user_id)).await?;

    Ok(Json(status_to_response(&status)))
}

/// Flip one tile, revealing its quote
pub async fn flip_tile(
    State(state): State<AppState>,
    Json(req): Json<FlipTileRequest>,
) -> ApiResult<Json<FlipResponse>> {
    let outcome = state
        .tiles
        .flip(&UserId(req.user_id), req.tile_index)
        .await?;

    Ok(Json(FlipResponse {
        tile_index: outcome.tile_index,
        quote: quote_to_response(&outcome.quote),
        status: status_to_response(&outcome.status),
    }))
}

/// Reset a user's board
pub async fn reset_board(
    State(state): State<AppState>,
    Json(req): Json<ResetBoardRequest>,
) -> ApiResult<Json<TileStatusResponse>> {
    let status = state.tiles.reset(&UserId(req.user_id)).await?;

    Ok(Json(status_to_response(&status)))
}

// Helper functions

pub(crate) fn status_to_response(status: &TileStatus) -> TileStatusResponse {
    TileStatusResponse {
        flipped: status
            .flipped
            .iter()
            .map(|f| TileFlipResponse {
                tile_index: f.tile_index,
                quote_index: f.quote_index,
                flipped_at: f.flipped_at,
            })
            .collect(),
        available_flips: status.available_flips,
        next_quote_index: status.next_quote_index,
        reset_at: status.reset_at,
        should_reset: status.should_reset,
    }
}
