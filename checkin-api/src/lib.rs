//! Check-In API Server
//!
//! Provides the REST surface for the wellbeing check-in backend.
//!
//! ## Endpoints
//!
//! ### Users
//! - POST /users - Register user
//! - GET /users/:user_id - Get user info
//!
//! ### Actions
//! - POST /checkins - Submit a check-in
//! - POST /journals - Submit a journal entry
//! - GET /actions/:user_id - Recent actions
//!
//! ### Tile Board
//! - GET /tiles/:user_id - Board snapshot
//! - POST /tiles/flip - Flip a tile
//! - POST /tiles/reset - Reset the board
//!
//! ### Rewards
//! - POST /rewards - Award bonus points (staff only)
//! - GET /rewards/:user_id - Point balance
//!
//! ### Settings
//! - GET /settings - Effective settings snapshot
//! - POST /settings - Update a setting (director-only)
//!
//! ### Quotes
//! - GET /quotes - List the rotation
//! - POST /quotes/:quote_index - Edit a quote (director-only)
//!
//! ### Analytics
//! - GET /analytics/houses - Points by house
//! - GET /analytics/classes - Points by class
//! - GET /analytics/daily - Mood/activity breakdown for a date
//!
//! ### Messages
//! - POST /messages - Send a message
//! - GET /messages/:user_id - Inbox
//! - POST /messages/:message_id/read - Mark read
//!
//! ### Admin
//! - POST /admin/purge - Bulk purge a role (director-only)
//! - POST /admin/role - Role override (director-only)

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
