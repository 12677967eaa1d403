//! Dashboard analytics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use checkin_core::{ActionKind, RewardLedger};
use checkin_db::today_local;
use serde::Deserialize;

use crate::dto::{
    ClassCountResponse, ClassPointsResponse, DailyBreakdownResponse, HousePointsResponse,
    MoodCountResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar date, "YYYY-MM-DD". Defaults to today (server-local).
    pub date: Option<String>,
}

/// Point totals grouped by house
pub async fn house_totals(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HousePointsResponse>>> {
    let totals = state.rewards.totals_by_house().await?;

    Ok(Json(
        totals
            .into_iter()
            .map(|t| HousePointsResponse {
                house: t.house,
                points: t.points,
            })
            .collect(),
    ))
}

/// Point totals grouped by class/grade
pub async fn class_totals(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ClassPointsResponse>>> {
    let totals = state.rewards.totals_by_class().await?;

    Ok(Json(
        totals
            .into_iter()
            .map(|t| ClassPointsResponse {
                class_name: t.class_name,
                points: t.points,
            })
            .collect(),
    ))
}

/// Mood and per-class activity for one calendar date
pub async fn daily_breakdown(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DailyBreakdownResponse>> {
    let date = query.date.unwrap_or_else(today_local);

    let moods = state.actions.mood_breakdown(&date).await?;
    let checkins = state
        .actions
        .class_breakdown(ActionKind::CheckIn, &date)
        .await?;
    let journals = state
        .actions
        .class_breakdown(ActionKind::Journal, &date)
        .await?;

    Ok(Json(DailyBreakdownResponse {
        date,
        moods: moods
            .into_iter()
            .map(|m| MoodCountResponse {
                mood: m.mood,
                count: m.count,
            })
            .collect(),
        checkins_by_class: checkins
            .into_iter()
            .map(|c| ClassCountResponse {
                class_name: c.class_name,
                count: c.count,
            })
            .collect(),
        journals_by_class: journals
            .into_iter()
            .map(|c| ClassCountResponse {
                class_name: c.class_name,
                count: c.count,
            })
            .collect(),
    }))
}
