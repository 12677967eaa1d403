//! Check-in API server entry point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkin_api::{run_server, ApiConfig};
use checkin_db::{SurrealConfig, SurrealDatastore};

#[derive(Parser, Debug)]
#[command(name = "checkin-api", about = "Wellbeing check-in API server")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "CHECKIN_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, env = "CHECKIN_PORT", default_value_t = 3000)]
    port: u16,

    /// SurrealDB endpoint, e.g. "ws://localhost:8000" or "mem://"
    #[arg(long, env = "CHECKIN_DB_ENDPOINT", default_value = "mem://")]
    db_endpoint: String,

    /// SurrealDB namespace
    #[arg(long, env = "CHECKIN_DB_NAMESPACE", default_value = "checkin")]
    db_namespace: String,

    /// SurrealDB database
    #[arg(long, env = "CHECKIN_DB_DATABASE", default_value = "wellbeing")]
    db_database: String,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging();

    let db_config = SurrealConfig {
        endpoint: cli.db_endpoint.clone(),
        namespace: cli.db_namespace.clone(),
        database: cli.db_database.clone(),
    };

    let datastore = match SurrealDatastore::connect(db_config).await {
        Ok(datastore) => Arc::new(datastore),
        Err(e) => {
            eprintln!("Error: failed to connect to datastore: {}", e);
            std::process::exit(1);
        }
    };

    let config = ApiConfig {
        host: cli.host,
        port: cli.port,
        enable_cors: !cli.no_cors,
    };

    if let Err(e) = run_server(config, datastore).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkin_api=info,checkin_db=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
