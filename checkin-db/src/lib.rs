//! Storage layer for the wellbeing check-in backend
//!
//! Implements the checkin-core trait seams on SurrealDB:
//! - `SurrealDatastore` - connection management and schema setup
//! - entities - one serde struct per table
//! - services - settings, actions, rewards, tiles, quotes, messages,
//!   users and administration
//!
//! Tests run against the in-memory engine (`mem://`).

pub mod datastore;
pub mod entities;
pub mod error;
pub mod schema;
pub mod services;
pub mod validation;

pub use datastore::{SurrealConfig, SurrealDatastore};
pub use entities::*;
pub use error::{StoreError, StoreResult};
pub use schema::CHECKIN_SCHEMA;
pub use services::{
    today_local, ActionService, AdminService, MessageService, QuoteService, RewardService,
    SettingsService, TileService, UserService,
};
