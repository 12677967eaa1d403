//! Quote rotation service
//!
//! The 50 fixed quotes behind the tile board. Seeded once at startup,
//! globally shared, editable by a director. A director edit can race a
//! concurrent flip; the flip just returns the text it read. Content-only,
//! so the race is accepted.

use std::sync::Arc;

use checkin_core::{
    CheckinError, CheckinResult, Quote, UserRecord, QUOTE_CYCLE_LEN,
};
use chrono::Utc;
use serde::Deserialize;
use surrealdb::sql::Datetime;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, QuoteEntity};
use crate::error::StoreError;
use crate::validation::normalize_opt;

/// The default rotation, seeded when the quote table is empty.
const DEFAULT_QUOTES: [(&str, Option<&str>); 50] = [
    ("The best way to predict the future is to create it.", Some("Peter Drucker")),
    ("Believe you can and you're halfway there.", Some("Theodore Roosevelt")),
    ("It always seems impossible until it's done.", Some("Nelson Mandela")),
    ("You miss 100% of the shots you don't take.", Some("Wayne Gretzky")),
    ("Every day may not be good, but there is something good in every day.", Some("Alice Morse Earle")),
    ("Fall seven times, stand up eight.", None),
    ("Happiness is not by chance, but by choice.", Some("Jim Rohn")),
    ("Act as if what you do makes a difference. It does.", Some("William James")),
    ("Keep your face to the sunshine and you cannot see a shadow.", Some("Helen Keller")),
    ("What we think, we become.", Some("Buddha")),
    ("Be yourself; everyone else is already taken.", Some("Oscar Wilde")),
    ("No act of kindness, no matter how small, is ever wasted.", Some("Aesop")),
    ("The secret of getting ahead is getting started.", Some("Mark Twain")),
    ("Courage is grace under pressure.", Some("Ernest Hemingway")),
    ("Wherever you go, go with all your heart.", Some("Confucius")),
    ("Do what you can, with what you have, where you are.", Some("Theodore Roosevelt")),
    ("Little by little, one travels far.", None),
    ("A journey of a thousand miles begins with a single step.", Some("Lao Tzu")),
    ("If you're going through hell, keep going.", Some("Winston Churchill")),
    ("Dream big and dare to fail.", Some("Norman Vaughan")),
    ("Everything you've ever wanted is on the other side of fear.", Some("George Addair")),
    ("Try to be a rainbow in someone's cloud.", Some("Maya Angelou")),
    ("We know what we are, but know not what we may be.", Some("William Shakespeare")),
    ("You are braver than you believe, stronger than you seem, and smarter than you think.", Some("A. A. Milne")),
    ("Nothing is impossible. The word itself says 'I'm possible'!", Some("Audrey Hepburn")),
    ("In the middle of difficulty lies opportunity.", Some("Albert Einstein")),
    ("The only way to do great work is to love what you do.", Some("Steve Jobs")),
    ("It does not matter how slowly you go as long as you do not stop.", Some("Confucius")),
    ("Light tomorrow with today.", Some("Elizabeth Barrett Browning")),
    ("Kind words can be short and easy to speak, but their echoes are truly endless.", Some("Mother Teresa")),
    ("Start where you are. Use what you have. Do what you can.", Some("Arthur Ashe")),
    ("Well done is better than well said.", Some("Benjamin Franklin")),
    ("The future belongs to those who believe in the beauty of their dreams.", Some("Eleanor Roosevelt")),
    ("You can't use up creativity. The more you use, the more you have.", Some("Maya Angelou")),
    ("A person who never made a mistake never tried anything new.", Some("Albert Einstein")),
    ("Mistakes are proof that you are trying.", None),
    ("Do small things with great love.", Some("Mother Teresa")),
    ("When you have a dream, you've got to grab it and never let go.", Some("Carol Burnett")),
    ("The more that you read, the more things you will know.", Some("Dr. Seuss")),
    ("Why fit in when you were born to stand out?", Some("Dr. Seuss")),
    ("Positive anything is better than negative nothing.", Some("Elbert Hubbard")),
    ("Each day provides its own gifts.", Some("Marcus Aurelius")),
    ("With the new day comes new strength and new thoughts.", Some("Eleanor Roosevelt")),
    ("It is never too late to be what you might have been.", Some("George Eliot")),
    ("Turn your wounds into wisdom.", Some("Oprah Winfrey")),
    ("However difficult life may seem, there is always something you can do and succeed at.", Some("Stephen Hawking")),
    ("Once you choose hope, anything's possible.", Some("Christopher Reeve")),
    ("Change your thoughts and you change your world.", Some("Norman Vincent Peale")),
    ("If opportunity doesn't knock, build a door.", Some("Milton Berle")),
    ("Alone we can do so little; together we can do so much.", Some("Helen Keller")),
];

#[derive(Debug, Deserialize)]
struct CountRow {
    cnt: u64,
}

/// Quote table access
pub struct QuoteService {
    datastore: Arc<SurrealDatastore>,
}

impl QuoteService {
    pub fn new(datastore: Arc<SurrealDatastore>) -> Self {
        Self { datastore }
    }

    /// Seed the default rotation if the table is empty. Idempotent.
    pub async fn seed_defaults(&self) -> CheckinResult<()> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT count() AS cnt FROM {} GROUP ALL",
                QuoteEntity::TABLE
            ))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<CountRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if rows.into_iter().next().map(|r| r.cnt).unwrap_or(0) > 0 {
            return Ok(());
        }

        let entities: Vec<QuoteEntity> = DEFAULT_QUOTES
            .iter()
            .enumerate()
            .map(|(i, (text, author))| {
                QuoteEntity::new(i as u8, text.to_string(), author.map(str::to_string))
            })
            .collect();

        self.datastore
            .client()
            .query(format!("INSERT INTO {} $quotes", QuoteEntity::TABLE))
            .bind(("quotes", entities))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(count = DEFAULT_QUOTES.len(), "Seeded default quotes");

        Ok(())
    }

    /// Get one quote by rotation index.
    pub async fn get(&self, quote_index: u8) -> CheckinResult<Quote> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE quote_index = $quote_index LIMIT 1",
                QuoteEntity::TABLE
            ))
            .bind(("quote_index", i64::from(quote_index)))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<QuoteEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        entities
            .into_iter()
            .next()
            .map(QuoteEntity::into_quote)
            .ok_or_else(|| CheckinError::NotFound(format!("Quote {}", quote_index)))
    }

    /// The full rotation, in order.
    pub async fn list(&self) -> CheckinResult<Vec<Quote>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} ORDER BY quote_index",
                QuoteEntity::TABLE
            ))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<QuoteEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities.into_iter().map(QuoteEntity::into_quote).collect())
    }

    /// Replace one quote's text/author. Director-only.
    pub async fn update(
        &self,
        actor: &UserRecord,
        quote_index: u8,
        text: String,
        author: Option<String>,
    ) -> CheckinResult<Quote> {
        if !actor.role.is_director() {
            return Err(CheckinError::Unauthorized(
                "Only a director can edit quotes.".to_string(),
            ));
        }
        if quote_index >= QUOTE_CYCLE_LEN {
            return Err(CheckinError::Validation(format!(
                "Quote index must be between 0 and {}.",
                QUOTE_CYCLE_LEN - 1
            )));
        }
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(CheckinError::Validation(
                "Quote text must not be empty.".to_string(),
            ));
        }

        // Ensure the slot exists before updating.
        self.get(quote_index).await?;

        let author = normalize_opt(author);

        self.datastore
            .client()
            .query(format!(
                "UPDATE {} SET text = $text, author = $author, updated_at = $now \
                 WHERE quote_index = $quote_index RETURN NONE",
                QuoteEntity::TABLE
            ))
            .bind(("quote_index", i64::from(quote_index)))
            .bind(("text", text.clone()))
            .bind(("author", author.clone()))
            .bind(("now", Datetime::from(Utc::now())))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(quote_index, "Quote updated");

        Ok(Quote {
            quote_index,
            text,
            author,
        })
    }
}
