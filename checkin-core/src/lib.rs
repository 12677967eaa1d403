//! Core domain layer for the wellbeing check-in backend
//!
//! Defines the shared vocabulary of the system: users and roles, check-in
//! and journal actions, the house-point ledger, the quote-tile board, and
//! the settings keys, together with the error taxonomy and the async trait
//! seams implemented by the storage layer (`checkin-db`).
//!
//! This crate performs no I/O.

pub mod constants;
pub mod error;
pub mod ledger;
pub mod types;

pub use constants::*;
pub use error::{CheckinError, CheckinResult};
pub use ledger::{ActionLedger, RewardLedger, SettingsProvider, TileBoard};
pub use types::*;
