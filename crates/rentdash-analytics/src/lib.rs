//! Rentdash Analytics
//!
//! The filtered aggregation query layer behind the rentdash dashboard. It
//! answers five parameterized analytical questions over a rental-store
//! dataset (top rented titles, revenue by category, top spenders, headline
//! KPIs, and recent transactions), each scoped by an optional store
//! identifier and an optional date range.
//!
//! ## Architecture
//!
//! ```text
//! dispatch layer (rentdash-api)
//!        │
//!        ▼
//! DashboardService ──── never fails; degrades to FallbackCatalog
//!        │
//!        ▼
//! RentalAnalytics trait ── SqliteAnalytics (dev/test)
//!        │                  PostgresAnalytics (`postgres` feature)
//!        ▼
//! PredicateSet ──────── filter → SQL fragments + positional parameters
//!        │
//!        ▼
//! sqlx connection pool ─ acquire per operation, release on every path
//! ```
//!
//! Filters compose into predicates once per query shape ([`sql`]), every
//! aggregation left-joins from its root so zero-activity entities still
//! report zeros ([`store`]), and the service layer ([`service`]) turns any
//! store failure into the operation's fallback dataset instead of an error.
//!
//! ## Usage
//!
//! ```ignore
//! use rentdash_analytics::{
//!     DashboardService, FallbackCatalog, ReportFilter, SqliteAnalytics,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteAnalytics::new("./data/rentdash.db").await?);
//! let dashboard = DashboardService::new(store, FallbackCatalog::default());
//!
//! let filter = ReportFilter::new(Some(1), None, None);
//! let films = dashboard.top_rented_films(&filter).await; // plain Vec, no Result
//! ```
//!
//! ## Thread safety
//!
//! Stores are `Send + Sync` and shareable via `Arc`; the only shared state
//! is the sqlx pool. Report records are plain values built fresh per call.

pub mod error;
pub mod fallback;
pub mod filter;
pub mod service;
pub mod sql;
pub mod store;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;

pub use error::{AnalyticsError, Result};
pub use fallback::FallbackCatalog;
pub use filter::ReportFilter;
pub use service::{DashboardService, DEFAULT_TRANSACTION_LIMIT};
pub use store::SqliteAnalytics;
pub use types::*;

#[cfg(feature = "postgres")]
pub use postgres::PostgresAnalytics;

/// The five aggregation operations, each a pure mapping from a filter to an
/// ordered sequence of records (key metrics returns a singleton).
///
/// Implementations may fail; the dashboard-facing guarantee of never failing
/// lives one layer up, in [`DashboardService`].
#[async_trait]
pub trait RentalAnalytics: Send + Sync {
    /// Films ranked by rental count inside the filter scope, capped at 10.
    async fn top_rented_films(&self, filter: &ReportFilter) -> Result<Vec<RankedFilm>>;

    /// Revenue and share-of-total per category, ordered by revenue.
    async fn revenue_by_category(&self, filter: &ReportFilter) -> Result<Vec<CategoryRevenue>>;

    /// Customers ranked by total spend inside the filter scope, capped at 10.
    async fn top_customers(&self, filter: &ReportFilter) -> Result<Vec<TopCustomer>>;

    /// Headline totals for the filter scope; zero scope yields zeros.
    async fn key_metrics(&self, filter: &ReportFilter) -> Result<KeyMetrics>;

    /// Latest payments with customer and film context, newest first.
    async fn recent_transactions(
        &self,
        filter: &ReportFilter,
        limit: i64,
    ) -> Result<Vec<Transaction>>;
}
