//! SurrealDB connection management

use surrealdb::engine::any::{connect, Any};
use surrealdb::Surreal;

use crate::error::{StoreError, StoreResult};
use crate::schema::CHECKIN_SCHEMA;

/// Datastore connection configuration
#[derive(Debug, Clone)]
pub struct SurrealConfig {
    /// Connection endpoint, e.g. "ws://localhost:8000" or "mem://" for an
    /// in-memory database (tests).
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
}

impl Default for SurrealConfig {
    fn default() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "checkin".to_string(),
            database: "wellbeing".to_string(),
        }
    }
}

/// Managed SurrealDB connection
pub struct SurrealDatastore {
    client: Surreal<Any>,
}

impl SurrealDatastore {
    /// Connect and select the configured namespace/database.
    pub async fn connect(config: SurrealConfig) -> StoreResult<Self> {
        let client = connect(&config.endpoint)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { client })
    }

    /// The underlying query client.
    pub fn client(&self) -> &Surreal<Any> {
        &self.client
    }

    /// Apply the table and index definitions. Idempotent.
    pub async fn init_schema(&self) -> StoreResult<()> {
        self.client
            .query(CHECKIN_SCHEMA)
            .await
            .map_err(|e| StoreError::Schema(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Schema(e.to_string()))?;

        Ok(())
    }

    /// Cheap connectivity probe for readiness checks.
    pub async fn health_check(&self) -> StoreResult<()> {
        self.client
            .query("RETURN 1")
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(())
    }
}
