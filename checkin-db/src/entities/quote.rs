//! Quote entity

use checkin_core::Quote;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use super::Entity;

/// One quote in the fixed 50-entry rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEntity {
    /// Rotation index (unique), 0..=49
    pub quote_index: u8,
    pub text: String,
    pub author: Option<String>,
    pub updated_at: Datetime,
}

impl Entity for QuoteEntity {
    const TABLE: &'static str = "quote";
}

impl QuoteEntity {
    pub fn new(quote_index: u8, text: String, author: Option<String>) -> Self {
        Self {
            quote_index,
            text,
            author,
            updated_at: Utc::now().into(),
        }
    }

    pub fn into_quote(self) -> Quote {
        Quote {
            quote_index: self.quote_index,
            text: self.text,
            author: self.author,
        }
    }
}
