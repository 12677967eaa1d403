//! Service-level behavior tests against an in-memory datastore.

use std::sync::Arc;

use checkin_core::{
    ActionKind, ActionLedger, ActionPayload, CheckinError, Role, RewardLedger, SettingKey,
    SettingValue, SettingsProvider, TileBoard, UserId, UserRecord, QUOTE_CYCLE_LEN, TILE_COUNT,
};
use checkin_db::{
    ActionService, AdminService, MessageService, QuoteService, RewardService, SettingsService,
    SurrealConfig, SurrealDatastore, TileService, UserService,
};
use chrono::{Duration, Utc};

struct TestBackend {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
    settings: Arc<SettingsService>,
    rewards: Arc<RewardService>,
    actions: Arc<ActionService>,
    tiles: Arc<TileService>,
    messages: Arc<MessageService>,
    admin: Arc<AdminService>,
}

async fn backend() -> TestBackend {
    let datastore = Arc::new(
        SurrealDatastore::connect(SurrealConfig::default())
            .await
            .unwrap(),
    );
    datastore.init_schema().await.unwrap();

    let users = Arc::new(UserService::new(datastore.clone()));
    let settings = Arc::new(SettingsService::new(datastore.clone()));
    let rewards = Arc::new(RewardService::new(datastore.clone(), users.clone()));
    let actions = Arc::new(ActionService::new(
        datastore.clone(),
        users.clone(),
        settings.clone(),
        rewards.clone(),
    ));
    let quotes = Arc::new(QuoteService::new(datastore.clone()));
    quotes.seed_defaults().await.unwrap();
    let tiles = Arc::new(TileService::new(
        datastore.clone(),
        users.clone(),
        settings.clone(),
        actions.clone(),
        rewards.clone(),
        quotes.clone(),
    ));
    let messages = Arc::new(MessageService::new(datastore.clone(), users.clone()));
    let admin = Arc::new(AdminService::new(datastore.clone(), users.clone()));

    TestBackend {
        datastore,
        users,
        settings,
        rewards,
        actions,
        tiles,
        messages,
        admin,
    }
}

impl TestBackend {
    async fn student(&self, name: &str) -> UserRecord {
        self.users
            .register(
                name,
                Role::Student,
                Some("7B".to_string()),
                Some("Emerald".to_string()),
            )
            .await
            .unwrap()
    }

    async fn director(&self) -> UserRecord {
        self.users
            .register("The Director", Role::Director, None, None)
            .await
            .unwrap()
    }

    async fn check_in(&self, user: &UserId) -> Result<(), CheckinError> {
        self.actions
            .record_action(
                user,
                ActionKind::CheckIn,
                ActionPayload {
                    mood: Some("happy".to_string()),
                    content: None,
                },
            )
            .await
            .map(|_| ())
    }

    async fn journal(&self, user: &UserId, text: &str) -> Result<(), CheckinError> {
        self.actions
            .record_action(
                user,
                ActionKind::Journal,
                ActionPayload {
                    mood: None,
                    content: Some(text.to_string()),
                },
            )
            .await
            .map(|_| ())
    }

    async fn raise_journal_cap(&self, cap: u32) {
        let director = self.director().await;
        self.settings
            .set(
                &director,
                SettingKey::MaxJournalEntriesPerDay,
                SettingValue::Number(cap),
            )
            .await
            .unwrap();
    }

    /// Backdate a user's cooldown stamp so the 24h window has elapsed.
    async fn backdate_cooldown(&self, user: &UserId) {
        self.datastore
            .client()
            .query("UPDATE tile_cycle SET reset_at = $ts WHERE user_id = $user_id")
            .bind((
                "ts",
                surrealdb::sql::Datetime::from(Utc::now() - Duration::hours(25)),
            ))
            .bind(("user_id", user.0.clone()))
            .await
            .unwrap()
            .check()
            .unwrap();
    }
}

// ============ Daily Cap Tests ============

#[tokio::test]
async fn test_default_cap_allows_one_checkin_per_day() {
    let backend = backend().await;
    let student = backend.student("Sam").await;

    backend.check_in(&student.user_id).await.unwrap();

    let err = backend.check_in(&student.user_id).await.unwrap_err();
    match err {
        CheckinError::CapExceeded(msg) => {
            assert_eq!(msg, "You've already checked in today.");
        }
        other => panic!("expected CapExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_raised_cap_allows_exactly_cap_actions() {
    let backend = backend().await;
    let director = backend.director().await;
    backend
        .settings
        .set(
            &director,
            SettingKey::MaxCheckinsPerDay,
            SettingValue::Number(3),
        )
        .await
        .unwrap();

    let student = backend.student("Alex").await;

    for _ in 0..3 {
        backend.check_in(&student.user_id).await.unwrap();
    }

    let err = backend.check_in(&student.user_id).await.unwrap_err();
    match err {
        CheckinError::CapExceeded(msg) => {
            assert_eq!(msg, "You've reached the daily limit of 3 check-ins.");
        }
        other => panic!("expected CapExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_staff_are_never_capped() {
    let backend = backend().await;
    let teacher = backend
        .users
        .register("Ms Reyes", Role::Teacher, Some("7B".to_string()), None)
        .await
        .unwrap();
    let director = backend.director().await;

    for _ in 0..5 {
        backend.check_in(&teacher.user_id).await.unwrap();
        backend.journal(&director.user_id, "staff note").await.unwrap();
    }
}

#[tokio::test]
async fn test_journal_cap_applies_independently() {
    let backend = backend().await;
    let student = backend.student("Noor").await;

    backend.check_in(&student.user_id).await.unwrap();
    backend.journal(&student.user_id, "first entry").await.unwrap();

    let err = backend
        .journal(&student.user_id, "second entry")
        .await
        .unwrap_err();
    match err {
        CheckinError::CapExceeded(msg) => {
            assert_eq!(msg, "You've already written a journal entry today.");
        }
        other => panic!("expected CapExceeded, got {:?}", other),
    }
}

// ============ Validation and Toggle Tests ============

#[tokio::test]
async fn test_checkin_without_mood_is_rejected() {
    let backend = backend().await;
    let student = backend.student("Kim").await;

    let err = backend
        .actions
        .record_action(&student.user_id, ActionKind::CheckIn, ActionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Validation(_)));
}

#[tokio::test]
async fn test_disabled_feature_rejects_actions() {
    let backend = backend().await;
    let director = backend.director().await;
    backend
        .settings
        .set(&director, SettingKey::CheckinsEnabled, SettingValue::Flag(false))
        .await
        .unwrap();

    let student = backend.student("Dana").await;
    let err = backend.check_in(&student.user_id).await.unwrap_err();
    match err {
        CheckinError::Validation(msg) => assert!(msg.contains("disabled")),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_settings_are_director_only_and_typed() {
    let backend = backend().await;
    let student = backend.student("Lee").await;

    let err = backend
        .settings
        .set(&student, SettingKey::MaxCheckinsPerDay, SettingValue::Number(5))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Unauthorized(_)));

    let director = backend.director().await;
    let err = backend
        .settings
        .set(
            &director,
            SettingKey::CheckinsEnabled,
            SettingValue::Number(2),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Validation(_)));

    let err = backend
        .settings
        .set(
            &director,
            SettingKey::MaxCheckinsPerDay,
            SettingValue::Number(1000),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Validation(_)));
}

#[tokio::test]
async fn test_settings_default_when_missing() {
    let backend = backend().await;

    assert!(backend.settings.flag(SettingKey::CheckinsEnabled).await);
    assert_eq!(backend.settings.cap(ActionKind::CheckIn).await, 1);

    let snapshot = backend.settings.snapshot().await;
    assert_eq!(snapshot.len(), SettingKey::ALL.len());
}

// ============ Tile Board Tests ============

#[tokio::test]
async fn test_flip_requires_an_earned_flip() {
    let backend = backend().await;
    let student = backend.student("Rio").await;

    let err = backend.tiles.flip(&student.user_id, 0).await.unwrap_err();
    assert!(matches!(err, CheckinError::NoFlipsAvailable));
}

#[tokio::test]
async fn test_three_journals_earn_three_flips() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Mika").await;

    for i in 0..3 {
        backend
            .journal(&student.user_id, &format!("entry {}", i))
            .await
            .unwrap();
    }

    let status = backend.tiles.status(&student.user_id).await.unwrap();
    assert_eq!(status.available_flips, 3);

    for (expected_left, tile) in [(2, 5u8), (1, 0), (0, 7)] {
        let outcome = backend.tiles.flip(&student.user_id, tile).await.unwrap();
        assert_eq!(outcome.status.available_flips, expected_left);
    }

    let err = backend.tiles.flip(&student.user_id, 3).await.unwrap_err();
    assert!(matches!(err, CheckinError::NoFlipsAvailable));
}

#[tokio::test]
async fn test_duplicate_flip_is_always_rejected() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Ash").await;

    for i in 0..3 {
        backend
            .journal(&student.user_id, &format!("entry {}", i))
            .await
            .unwrap();
    }

    backend.tiles.flip(&student.user_id, 4).await.unwrap();
    let err = backend.tiles.flip(&student.user_id, 4).await.unwrap_err();
    assert!(matches!(err, CheckinError::AlreadyFlipped(4)));

    // Still rejected after other tiles are flipped.
    backend.tiles.flip(&student.user_id, 9).await.unwrap();
    let err = backend.tiles.flip(&student.user_id, 4).await.unwrap_err();
    assert!(matches!(err, CheckinError::AlreadyFlipped(4)));
}

#[tokio::test]
async fn test_out_of_range_tile_is_rejected() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Joss").await;
    backend.journal(&student.user_id, "entry").await.unwrap();

    let err = backend.tiles.flip(&student.user_id, 12).await.unwrap_err();
    assert!(matches!(err, CheckinError::Validation(_)));
}

#[tokio::test]
async fn test_first_flip_issues_quote_zero_and_advances_cursor() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Vera").await;
    backend.journal(&student.user_id, "entry").await.unwrap();

    let outcome = backend.tiles.flip(&student.user_id, 6).await.unwrap();
    assert_eq!(outcome.quote.quote_index, 0);
    assert_eq!(outcome.status.next_quote_index, 1);
}

#[tokio::test]
async fn test_completing_the_board_stamps_the_cooldown() {
    let backend = backend().await;
    backend.raise_journal_cap(999).await;
    let student = backend.student("Remy").await;

    for i in 0..TILE_COUNT {
        backend
            .journal(&student.user_id, &format!("entry {}", i))
            .await
            .unwrap();
    }
    for tile in 0..TILE_COUNT as u8 {
        backend.tiles.flip(&student.user_id, tile).await.unwrap();
    }

    let status = backend.tiles.status(&student.user_id).await.unwrap();
    assert_eq!(status.flipped_count(), TILE_COUNT);
    assert!(status.reset_at.is_some());
    // Cooldown has not elapsed yet.
    assert!(!status.should_reset);

    backend.backdate_cooldown(&student.user_id).await;
    let status = backend.tiles.status(&student.user_id).await.unwrap();
    assert!(status.should_reset);
}

#[tokio::test]
async fn test_cursor_visits_all_fifty_quotes_exactly_once() {
    let backend = backend().await;
    backend.raise_journal_cap(999).await;
    let student = backend.student("Quinn").await;

    // Plenty of earned flips: availability is lifetime journals minus
    // currently flipped tiles, so 50 entries cover every round.
    for i in 0..50 {
        backend
            .journal(&student.user_id, &format!("entry {}", i))
            .await
            .unwrap();
    }

    let mut issued = Vec::new();
    while issued.len() < usize::from(QUOTE_CYCLE_LEN) {
        let status = backend.tiles.status(&student.user_id).await.unwrap();
        if status.flipped_count() == TILE_COUNT {
            backend.backdate_cooldown(&student.user_id).await;
            backend.tiles.reset(&student.user_id).await.unwrap();
        }

        let status = backend.tiles.status(&student.user_id).await.unwrap();
        let tile = status.flipped_count() as u8;
        let outcome = backend.tiles.flip(&student.user_id, tile).await.unwrap();
        issued.push(outcome.quote.quote_index);
    }

    let mut sorted = issued.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), usize::from(QUOTE_CYCLE_LEN));

    // The 51st flip wraps back to the start of the rotation.
    let status = backend.tiles.status(&student.user_id).await.unwrap();
    if status.flipped_count() == TILE_COUNT {
        backend.backdate_cooldown(&student.user_id).await;
        backend.tiles.reset(&student.user_id).await.unwrap();
    }
    let status = backend.tiles.status(&student.user_id).await.unwrap();
    let tile = status.flipped_count() as u8;
    let outcome = backend.tiles.flip(&student.user_id, tile).await.unwrap();
    assert_eq!(outcome.quote.quote_index, 0);
}

#[tokio::test]
async fn test_midcycle_reset_restarts_the_rotation() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Tam").await;

    for i in 0..5 {
        backend
            .journal(&student.user_id, &format!("entry {}", i))
            .await
            .unwrap();
    }
    for tile in 0..3u8 {
        backend.tiles.flip(&student.user_id, tile).await.unwrap();
    }

    let status = backend.tiles.reset(&student.user_id).await.unwrap();
    assert!(status.flipped.is_empty());
    assert_eq!(status.next_quote_index, 0);
    assert!(status.reset_at.is_some());

    let outcome = backend.tiles.flip(&student.user_id, 11).await.unwrap();
    assert_eq!(outcome.quote.quote_index, 0);
}

// ============ Reward Ledger Tests ============

#[tokio::test]
async fn test_rewards_accumulate_monotonically() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Pia").await;

    backend.check_in(&student.user_id).await.unwrap();
    let after_checkin = backend
        .rewards
        .balance(&student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_checkin.total, 1);

    backend.journal(&student.user_id, "one").await.unwrap();
    backend.journal(&student.user_id, "two").await.unwrap();
    let after_journals = backend
        .rewards
        .balance(&student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_journals.total, 5);
    assert!(after_journals.total >= after_checkin.total);

    backend.tiles.flip(&student.user_id, 0).await.unwrap();
    let after_flip = backend
        .rewards
        .balance(&student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_flip.total, 6);
}

#[tokio::test]
async fn test_rewards_skip_staff_and_houseless_students() {
    let backend = backend().await;
    let teacher = backend
        .users
        .register("Mr Okafor", Role::Teacher, None, None)
        .await
        .unwrap();
    backend.check_in(&teacher.user_id).await.unwrap();
    assert!(backend
        .rewards
        .balance(&teacher.user_id)
        .await
        .unwrap()
        .is_none());

    let houseless = backend
        .users
        .register("New Kid", Role::Student, Some("7B".to_string()), None)
        .await
        .unwrap();
    backend.check_in(&houseless.user_id).await.unwrap();
    assert!(backend
        .rewards
        .balance(&houseless.user_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_totals_group_by_house_and_class() {
    let backend = backend().await;
    let a = backend.student("Ana").await; // 7B / Emerald
    let b = backend
        .users
        .register(
            "Ben",
            Role::Student,
            Some("8A".to_string()),
            Some("Amber".to_string()),
        )
        .await
        .unwrap();
    let c = backend
        .users
        .register(
            "Cal",
            Role::Student,
            Some("7B".to_string()),
            Some("Amber".to_string()),
        )
        .await
        .unwrap();

    backend.check_in(&a.user_id).await.unwrap(); // Emerald +1
    backend.journal(&b.user_id, "entry").await.unwrap(); // Amber +2
    backend.check_in(&c.user_id).await.unwrap(); // Amber +1

    let houses = backend.rewards.totals_by_house().await.unwrap();
    let amber = houses.iter().find(|h| h.house == "Amber").unwrap();
    let emerald = houses.iter().find(|h| h.house == "Emerald").unwrap();
    assert_eq!(amber.points, 3);
    assert_eq!(emerald.points, 1);

    let classes = backend.rewards.totals_by_class().await.unwrap();
    let class_7b = classes.iter().find(|c| c.class_name == "7B").unwrap();
    let class_8a = classes.iter().find(|c| c.class_name == "8A").unwrap();
    assert_eq!(class_7b.points, 2);
    assert_eq!(class_8a.points, 2);
}

// ============ Messaging Tests ============

#[tokio::test]
async fn test_send_inbox_and_mark_read() {
    let backend = backend().await;
    let student = backend.student("Ira").await;
    let teacher = backend
        .users
        .register("Ms Cho", Role::Teacher, None, None)
        .await
        .unwrap();

    let sent = backend
        .messages
        .send(&teacher.user_id, &student.user_id, "Well done this week!")
        .await
        .unwrap();

    let inbox = backend.messages.inbox(&student.user_id, 20).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].read_at.is_none());

    backend
        .messages
        .mark_read(&student.user_id, &sent.message_id)
        .await
        .unwrap();
    let inbox = backend.messages.inbox(&student.user_id, 20).await.unwrap();
    assert!(inbox[0].read_at.is_some());

    // Only the recipient can mark a message read.
    let err = backend
        .messages
        .mark_read(&teacher.user_id, &sent.message_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::NotFound(_)));
}

// ============ Purge Tests ============

async fn count_table(backend: &TestBackend, table: &str) -> u64 {
    #[derive(serde::Deserialize)]
    struct CountRow {
        cnt: u64,
    }

    let mut response = backend
        .datastore
        .client()
        .query(format!("SELECT count() AS cnt FROM {} GROUP ALL", table))
        .await
        .unwrap();
    let rows: Vec<CountRow> = response.take(0).unwrap();
    rows.into_iter().next().map(|r| r.cnt).unwrap_or(0)
}

#[tokio::test]
async fn test_purge_is_all_or_nothing() {
    let backend = backend().await;
    backend.raise_journal_cap(10).await;
    let student = backend.student("Zed").await;
    let teacher = backend
        .users
        .register("Mr Hale", Role::Teacher, None, None)
        .await
        .unwrap();

    backend.check_in(&student.user_id).await.unwrap();
    backend.journal(&student.user_id, "entry").await.unwrap();
    backend.tiles.flip(&student.user_id, 0).await.unwrap();
    backend
        .messages
        .send(&teacher.user_id, &student.user_id, "hello")
        .await
        .unwrap();

    let actions_before = count_table(&backend, "action").await;
    assert!(actions_before > 0);

    // A failure inside the transaction rolls back every statement.
    let result = backend
        .datastore
        .client()
        .query(
            "BEGIN TRANSACTION;\n\
             DELETE action WHERE user_id = $user_id;\n\
             THROW 'simulated failure';\n\
             COMMIT TRANSACTION;",
        )
        .bind(("user_id", student.user_id.0.clone()))
        .await
        .unwrap()
        .check();
    assert!(result.is_err());
    assert_eq!(count_table(&backend, "action").await, actions_before);

    // The real purge removes the role's users and every dependent row.
    let director = backend.director().await;
    let summary = backend
        .admin
        .purge_role(&director, Role::Student)
        .await
        .unwrap();
    assert_eq!(summary.users_removed, 1);

    assert_eq!(count_table(&backend, "action").await, 0);
    assert_eq!(count_table(&backend, "house_points").await, 0);
    assert_eq!(count_table(&backend, "tile_flip").await, 0);
    assert_eq!(count_table(&backend, "tile_cycle").await, 0);
    assert_eq!(count_table(&backend, "message").await, 0);
    assert!(backend.users.get(&student.user_id).await.unwrap().is_none());
    // Staff accounts are untouched.
    assert!(backend.users.get(&teacher.user_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_purge_requires_director() {
    let backend = backend().await;
    let student = backend.student("Gil").await;

    let err = backend
        .admin
        .purge_role(&student, Role::Student)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Unauthorized(_)));
}

#[tokio::test]
async fn test_role_override_is_director_only() {
    let backend = backend().await;
    let director = backend.director().await;
    let student = backend.student("Remi").await;

    let err = backend
        .admin
        .set_role(&student, &director.user_id, Role::Student)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckinError::Unauthorized(_)));

    let updated = backend
        .admin
        .set_role(&director, &student.user_id, Role::Teacher)
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Teacher);
}
