//! Analytics Error Types
//!
//! Two failure families matter to the resilience policy in
//! [`crate::service::DashboardService`]:
//!
//! - `DataSource`: the pool, the query, or row decoding failed. The live
//!   database is unreachable or returned something unusable.
//! - `Unexpected`: anything else, including failures raised by alternative
//!   [`crate::RentalAnalytics`] implementations.
//!
//! `Migration` only occurs while constructing a store and is the one error
//! that propagates to the caller; everything after construction is absorbed
//! by the dashboard service.
//!
//! All operations return `Result<T>`, aliased to `Result<T, AnalyticsError>`,
//! so errors propagate cleanly with `?`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("data source error: {0}")]
    DataSource(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<sqlx::migrate::MigrateError> for AnalyticsError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AnalyticsError::Migration(e.to_string())
    }
}
