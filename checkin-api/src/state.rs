//! Application state for the API server

use std::sync::Arc;

use checkin_core::CheckinError;
use checkin_db::{
    ActionService, AdminService, MessageService, QuoteService, RewardService, SettingsService,
    SurrealDatastore, TileService, UserService,
};

/// API server state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub settings: Arc<SettingsService>,
    pub actions: Arc<ActionService>,
    pub rewards: Arc<RewardService>,
    pub tiles: Arc<TileService>,
    pub quotes: Arc<QuoteService>,
    pub messages: Arc<MessageService>,
    pub admin: Arc<AdminService>,
    pub datastore: Arc<SurrealDatastore>,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create new app state from a datastore: applies the schema, seeds
    /// the quote rotation and wires the service graph.
    pub async fn new(datastore: Arc<SurrealDatastore>) -> Result<Self, CheckinError> {
        datastore.init_schema().await?;

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
        quotes.seed_defaults().await?;
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

        Ok(Self {
            users,
            settings,
            actions,
            rewards,
            tiles,
            quotes,
            messages,
            admin,
            datastore,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}
