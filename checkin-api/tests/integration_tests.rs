//! Integration tests for the check-in API endpoints
//!
//! These tests drive the HTTP surface end-to-end against an in-memory
//! datastore: registration, check-ins and caps, the tile board, settings,
//! analytics, messaging and the administrative purge.

use axum::http::StatusCode;
use axum_test::TestServer;
use checkin_api::{create_router, AppState};
use checkin_db::{SurrealConfig, SurrealDatastore};
use serde_json::json;
use std::sync::Arc;

/// Create test database config for in-memory database
fn create_test_db_config() -> SurrealConfig {
    SurrealConfig {
        endpoint: "mem://".to_string(),
        namespace: "checkin_test".to_string(),
        database: "wellbeing_test".to_string(),
    }
}

/// Create test app state with in-memory database
async fn create_test_state() -> AppState {
    let config = create_test_db_config();
    let datastore = Arc::new(SurrealDatastore::connect(config).await.unwrap());
    AppState::new(datastore).await.unwrap()
}

/// Create test server
async fn create_test_server() -> TestServer {
    let state = create_test_state().await;
    let router = create_router(state);
    TestServer::new(router).unwrap()
}

/// Register a user and return its ID
async fn register(server: &TestServer, name: &str, role: &str, class: Option<&str>, house: Option<&str>) -> String {
    let response = server
        .post("/users")
        .json(&json!({
            "display_name": name,
            "role": role,
            "class_name": class,
            "house": house,
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["user_id"].as_str().unwrap().to_string()
}

async fn register_student(server: &TestServer, name: &str) -> String {
    register(server, name, "student", Some("7B"), Some("Emerald")).await
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_check() {
    let server = create_test_server().await;

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

// ============ User Endpoint Tests ============

#[tokio::test]
async fn test_register_and_get_user() {
    let server = create_test_server().await;

    let user_id = register_student(&server, "Sam").await;

    let response = server.get(&format!("/users/{}", user_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["display_name"], "Sam");
    assert_eq!(body["role"], "student");
    assert_eq!(body["house"], "Emerald");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let server = create_test_server().await;

    let response = server.get("/users/nonexistent_user_id").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_register_rejects_unknown_role() {
    let server = create_test_server().await;

    let response = server
        .post("/users")
        .json(&json!({
            "display_name": "Eve",
            "role": "admin",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============ Check-In Endpoint Tests ============

#[tokio::test]
async fn test_checkin_then_daily_cap() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Alex").await;

    let response = server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "happy" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "check_in");
    assert_eq!(body["mood"], "happy");

    let response = server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "tired" }))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CAP_EXCEEDED");
    assert_eq!(body["error"], "You've already checked in today.");
}

#[tokio::test]
async fn test_checkin_with_blank_mood_is_rejected() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Kim").await;

    let response = server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_history_lists_recent_actions() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Noor").await;

    server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "calm" }))
        .await
        .assert_status_ok();
    server
        .post("/journals")
        .json(&json!({ "user_id": user_id, "content": "A good day." }))
        .await
        .assert_status_ok();

    let response = server.get(&format!("/actions/{}", user_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// ============ Tile Board Endpoint Tests ============

#[tokio::test]
async fn test_journal_earns_a_flip() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Mika").await;

    server
        .post("/journals")
        .json(&json!({ "user_id": user_id, "content": "Earned a flip." }))
        .await
        .assert_status_ok();

    let response = server.get(&format!("/tiles/{}", user_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_flips"], 1);
    assert_eq!(body["next_quote_index"], 0);

    let response = server
        .post("/tiles/flip")
        .json(&json!({ "user_id": user_id, "tile_index": 3 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["quote"]["quote_index"], 0);
    assert_eq!(
        body["quote"]["text"],
        "The best way to predict the future is to create it."
    );
    assert_eq!(body["status"]["available_flips"], 0);
    assert_eq!(body["status"]["next_quote_index"], 1);

    // Same tile again: already flipped.
    let response = server
        .post("/tiles/flip")
        .json(&json!({ "user_id": user_id, "tile_index": 3 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "ALREADY_FLIPPED");

    // Different tile with no flips left.
    let response = server
        .post("/tiles/flip")
        .json(&json!({ "user_id": user_id, "tile_index": 4 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NO_FLIPS_AVAILABLE");
}

#[tokio::test]
async fn test_tile_status_for_unknown_user() {
    let server = create_test_server().await;

    let response = server.get("/tiles/nonexistent_user_id").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_board_reset() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Tam").await;

    server
        .post("/journals")
        .json(&json!({ "user_id": user_id, "content": "entry" }))
        .await
        .assert_status_ok();
    server
        .post("/tiles/flip")
        .json(&json!({ "user_id": user_id, "tile_index": 0 }))
        .await
        .assert_status_ok();

    let response = server
        .post("/tiles/reset")
        .json(&json!({ "user_id": user_id }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["flipped"].as_array().unwrap().len(), 0);
    assert_eq!(body["next_quote_index"], 0);
}

// ============ Settings Endpoint Tests ============

#[tokio::test]
async fn test_settings_defaults() {
    let server = create_test_server().await;

    let response = server.get("/settings").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let settings = body["settings"].as_array().unwrap();
    assert_eq!(settings.len(), 5);
    assert!(settings
        .iter()
        .any(|s| s["key"] == "max_checkins_per_day" && s["value"] == 1));
}

#[tokio::test]
async fn test_settings_update_is_director_only() {
    let server = create_test_server().await;
    let student_id = register_student(&server, "Lee").await;

    let response = server
        .post("/settings")
        .json(&json!({
            "actor_id": student_id,
            "key": "max_checkins_per_day",
            "value": 2,
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let director_id = register(&server, "The Director", "director", None, None).await;
    let response = server
        .post("/settings")
        .json(&json!({
            "actor_id": director_id,
            "key": "max_checkins_per_day",
            "value": 2,
        }))
        .await;
    response.assert_status_ok();

    // The raised cap takes effect for students.
    let user_id = register_student(&server, "Ria").await;
    for mood in ["happy", "focused"] {
        server
            .post("/checkins")
            .json(&json!({ "user_id": user_id, "mood": mood }))
            .await
            .assert_status_ok();
    }
    let response = server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "tired" }))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "You've reached the daily limit of 2 check-ins.");
}

// ============ Quote Endpoint Tests ============

#[tokio::test]
async fn test_quote_edit_is_director_only() {
    let server = create_test_server().await;

    let response = server.get("/quotes").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 50);

    let student_id = register_student(&server, "Gil").await;
    let response = server
        .post("/quotes/0")
        .json(&json!({ "actor_id": student_id, "text": "New text" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let director_id = register(&server, "The Director", "director", None, None).await;
    let response = server
        .post("/quotes/0")
        .json(&json!({ "actor_id": director_id, "text": "Every day is a fresh start." }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["text"], "Every day is a fresh start.");
}

// ============ Reward Endpoint Tests ============

#[tokio::test]
async fn test_bonus_award_is_staff_only() {
    let server = create_test_server().await;
    let teacher_id = register(&server, "Mr Hale", "teacher", None, None).await;
    let student_id = register_student(&server, "Ona").await;

    let response = server
        .post("/rewards")
        .json(&json!({
            "actor_id": student_id,
            "user_id": student_id,
            "points": 5,
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post("/rewards")
        .json(&json!({
            "actor_id": teacher_id,
            "user_id": student_id,
            "points": 5,
        }))
        .await;
    response.assert_status_ok();

    let response = server.get(&format!("/rewards/{}", student_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 5);
    assert_eq!(body["house"], "Emerald");
}

// ============ Analytics Endpoint Tests ============

#[tokio::test]
async fn test_house_totals_after_actions() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Pia").await;

    server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "happy" }))
        .await
        .assert_status_ok();

    let response = server.get("/analytics/houses").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let totals = body.as_array().unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0]["house"], "Emerald");
    assert_eq!(totals[0]["points"], 1);
}

#[tokio::test]
async fn test_daily_breakdown() {
    let server = create_test_server().await;
    let user_id = register_student(&server, "Ines").await;

    server
        .post("/checkins")
        .json(&json!({ "user_id": user_id, "mood": "happy" }))
        .await
        .assert_status_ok();

    let response = server.get("/analytics/daily").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let moods = body["moods"].as_array().unwrap();
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0]["mood"], "happy");
    assert_eq!(moods[0]["count"], 1);
    let classes = body["checkins_by_class"].as_array().unwrap();
    assert_eq!(classes[0]["class_name"], "7B");
}

// ============ Message Endpoint Tests ============

#[tokio::test]
async fn test_message_flow() {
    let server = create_test_server().await;
    let teacher_id = register(&server, "Ms Cho", "teacher", None, None).await;
    let student_id = register_student(&server, "Ira").await;

    let response = server
        .post("/messages")
        .json(&json!({
            "sender_id": teacher_id,
            "recipient_id": student_id,
            "body": "Great work this week!",
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let message_id = body["message_id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/messages/{}", student_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = server
        .post(&format!("/messages/{}/read", message_id))
        .json(&json!({ "user_id": student_id }))
        .await;
    response.assert_status_ok();
}

// ============ Admin Endpoint Tests ============

#[tokio::test]
async fn test_purge_role_is_director_only_and_cascades() {
    let server = create_test_server().await;
    let student_id = register_student(&server, "Zed").await;

    server
        .post("/checkins")
        .json(&json!({ "user_id": student_id, "mood": "happy" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/admin/purge")
        .json(&json!({ "actor_id": student_id, "role": "student" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let director_id = register(&server, "The Director", "director", None, None).await;
    let response = server
        .post("/admin/purge")
        .json(&json!({ "actor_id": director_id, "role": "student" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["users_removed"], 1);

    let response = server.get(&format!("/users/{}", student_id)).await;
    response.assert_status_not_found();

    let response = server.get(&format!("/actions/{}", student_id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}
