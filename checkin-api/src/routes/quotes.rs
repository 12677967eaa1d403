//! Quote rotation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use checkin_core::{Quote, UserId};

use crate::dto::{QuoteResponse, UpdateQuoteRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List the full quote rotation
pub async fn list_quotes(State(state): State<AppState>) -> ApiResult<Json<Vec<QuoteResponse>>> {
    let quotes = state.quotes.list().await?;

    Ok(Json(quotes.iter().map(quote_to_response).collect()))
}

/// Replace one quote's text/author (director-only)
pub async fn update_quote(
    State(state): State<AppState>,
    Path(quote_index): Path<u8>,
    Json(req): Json<UpdateQuoteRequest>,
) -> ApiResult<Json<QuoteResponse>> {
    let actor = state
        .users
        .get(&UserId(req.actor_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", req.actor_id)))?;

    let quote = state
        .quotes
        .update(&actor, quote_index, req.text, req.author)
        .await?;

    Ok(Json(quote_to_response(&quote)))
}

// Helper functions

pub(crate) fn quote_to_response(quote: &Quote) -> QuoteResponse {
    QuoteResponse {
        quote_index: quote.quote_index,
        text: quote.text.clone(),
        author: quote.author.clone(),
    }
}
