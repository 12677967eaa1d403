//! Service implementations
//!
//! Concrete implementations of the trait seams defined in checkin-core,
//! backed by the SurrealDB storage layer.

pub mod action_service;
pub mod admin_service;
pub mod message_service;
pub mod quote_service;
pub mod reward_service;
pub mod settings_service;
pub mod tile_service;
pub mod user_service;

pub use action_service::{today_local, ActionService};
pub use admin_service::AdminService;
pub use message_service::MessageService;
pub use quote_service::QuoteService;
pub use reward_service::RewardService;
pub use settings_service::SettingsService;
pub use tile_service::TileService;
pub use user_service::UserService;
