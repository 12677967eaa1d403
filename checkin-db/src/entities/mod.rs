//! Stored entities, one per table
//!
//! Entities are the serde shapes that go in and out of SurrealDB. They
//! carry `surrealdb::sql::Datetime` timestamps so SCHEMAFULL `datetime`
//! fields round-trip; conversion to the chrono-based core types happens
//! at the service boundary.

mod action;
mod message;
mod points;
mod quote;
mod setting;
mod tiles;
mod user;

pub use action::ActionEntity;
pub use message::MessageEntity;
pub use points::HousePointsEntity;
pub use quote::QuoteEntity;
pub use setting::SettingEntity;
pub use tiles::{TileCycleEntity, TileFlipEntity};
pub use user::UserEntity;

/// Marker trait binding an entity struct to its table name.
pub trait Entity {
    const TABLE: &'static str;
}
