//! Rentdash REST API Server Binary
//!
//! # Environment Variables
//!
//! - `RENTDASH_DB`: SQLite path or PostgreSQL URL (default: ./data/rentdash.db)
//! - `RENTDASH_PORT`: HTTP port (default: 4000)
//! - `RUST_LOG`: Log level (default: info)
//!
//! # Example
//!
//! ```bash
//! export RENTDASH_DB=./data/rentdash.db
//! export RENTDASH_PORT=4000
//! cargo run --bin api
//! ```

use rentdash_analytics::{DashboardService, FallbackCatalog, RentalAnalytics, SqliteAnalytics};
use rentdash_api::{create_router, serve, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Rentdash API starting...");

    let db_url =
        std::env::var("RENTDASH_DB").unwrap_or_else(|_| "./data/rentdash.db".to_string());
    let port = std::env::var("RENTDASH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(4000);

    info!("Configuration:");
    info!("  Database: {}", db_url);
    info!("  Port: {}", port);

    let analytics: Arc<dyn RentalAnalytics> =
        if db_url.starts_with("postgres://") || db_url.starts_with("postgresql://") {
            #[cfg(feature = "postgres")]
            {
                info!("  Using PostgreSQL");
                Arc::new(rentdash_analytics::PostgresAnalytics::new(&db_url).await?)
            }
            #[cfg(not(feature = "postgres"))]
            {
                return Err("PostgreSQL URL provided but postgres feature not enabled".into());
            }
        } else {
            info!("  Using SQLite");
            Arc::new(SqliteAnalytics::new(&db_url).await?)
        };

    info!("✓ Rental database connected");

    let dashboard = Arc::new(DashboardService::new(
        analytics.clone(),
        FallbackCatalog::default(),
    ));

    let state = AppState {
        dashboard,
        analytics,
    };

    serve(create_router(state), port).await
}
