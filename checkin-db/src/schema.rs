//! SurrealDB schema definitions for the check-in backend

/// Complete schema for the check-in backend
pub const CHECKIN_SCHEMA: &str = r#"
-- ============================================
-- User Table
-- ============================================
DEFINE TABLE app_user SCHEMAFULL;
DEFINE FIELD user_id ON app_user TYPE string;
DEFINE FIELD display_name ON app_user TYPE string;
DEFINE FIELD role ON app_user TYPE string ASSERT $value IN ['student', 'teacher', 'director'];
DEFINE FIELD class_name ON app_user TYPE option<string>;
DEFINE FIELD house ON app_user TYPE option<string>;
DEFINE FIELD created_at ON app_user TYPE datetime;
DEFINE INDEX idx_user_id ON app_user FIELDS user_id UNIQUE;
DEFINE INDEX idx_user_role ON app_user FIELDS role;

-- ============================================
-- Action Table (check-ins and journal entries)
-- ============================================
DEFINE TABLE action SCHEMAFULL;
DEFINE FIELD action_id ON action TYPE string;
DEFINE FIELD user_id ON action TYPE string;
DEFINE FIELD kind ON action TYPE string ASSERT $value IN ['check_in', 'journal'];
DEFINE FIELD mood ON action TYPE option<string>;
DEFINE FIELD content ON action TYPE option<string>;
DEFINE FIELD class_name ON action TYPE option<string>;
DEFINE FIELD action_date ON action TYPE string;
DEFINE FIELD created_at ON action TYPE datetime;
DEFINE INDEX idx_action_id ON action FIELDS action_id UNIQUE;
DEFINE INDEX idx_action_user_kind_date ON action FIELDS user_id, kind, action_date;

-- ============================================
-- Settings Table (feature toggles, daily caps)
-- ============================================
DEFINE TABLE setting SCHEMAFULL;
DEFINE FIELD key ON setting TYPE string;
DEFINE FIELD value ON setting TYPE any;
DEFINE FIELD updated_at ON setting TYPE datetime;
DEFINE FIELD updated_by ON setting TYPE option<string>;
DEFINE INDEX idx_setting_key ON setting FIELDS key UNIQUE;

-- ============================================
-- House Points Table (one row per user)
-- ============================================
DEFINE TABLE house_points SCHEMAFULL;
DEFINE FIELD user_id ON house_points TYPE string;
DEFINE FIELD house ON house_points TYPE string;
DEFINE FIELD class_name ON house_points TYPE option<string>;
DEFINE FIELD total ON house_points TYPE int;
DEFINE FIELD updated_at ON house_points TYPE datetime;
DEFINE INDEX idx_points_user ON house_points FIELDS user_id UNIQUE;
DEFINE INDEX idx_points_house ON house_points FIELDS house;

-- ============================================
-- Tile Flip Table (one row per revealed tile)
-- ============================================
DEFINE TABLE tile_flip SCHEMAFULL;
DEFINE FIELD user_id ON tile_flip TYPE string;
DEFINE FIELD tile_index ON tile_flip TYPE int ASSERT $value >= 0 AND $value <= 11;
DEFINE FIELD quote_index ON tile_flip TYPE int ASSERT $value >= 0 AND $value <= 49;
DEFINE FIELD flipped_at ON tile_flip TYPE datetime;
DEFINE INDEX idx_flip_user_tile ON tile_flip FIELDS user_id, tile_index UNIQUE;

-- ============================================
-- Tile Cycle Table (per-user quote cursor)
-- ============================================
DEFINE TABLE tile_cycle SCHEMAFULL;
DEFINE FIELD user_id ON tile_cycle TYPE string;
DEFINE FIELD next_quote_index ON tile_cycle TYPE int ASSERT $value >= 0 AND $value <= 49;
DEFINE FIELD reset_at ON tile_cycle TYPE option<datetime>;
DEFINE FIELD updated_at ON tile_cycle TYPE datetime;
DEFINE INDEX idx_cycle_user ON tile_cycle FIELDS user_id UNIQUE;

-- ============================================
-- Quote Table (fixed 50-entry rotation)
-- ============================================
DEFINE TABLE quote SCHEMAFULL;
DEFINE FIELD quote_index ON quote TYPE int ASSERT $value >= 0 AND $value <= 49;
DEFINE FIELD text ON quote TYPE string;
DEFINE FIELD author ON quote TYPE option<string>;
DEFINE FIELD updated_at ON quote TYPE datetime;
DEFINE INDEX idx_quote_index ON quote FIELDS quote_index UNIQUE;

-- ============================================
-- Message Table
-- ============================================
DEFINE TABLE message SCHEMAFULL;
DEFINE FIELD message_id ON message TYPE string;
DEFINE FIELD sender_id ON message TYPE string;
DEFINE FIELD recipient_id ON message TYPE string;
DEFINE FIELD body ON message TYPE string;
DEFINE FIELD sent_at ON message TYPE datetime;
DEFINE FIELD read_at ON message TYPE option<datetime>;
DEFINE INDEX idx_message_id ON message FIELDS message_id UNIQUE;
DEFINE INDEX idx_message_recipient ON message FIELDS recipient_id;
DEFINE INDEX idx_message_sender ON message FIELDS sender_id;
"#;
