//! Dashboard Service: the resilience policy layer
//!
//! Wraps a [`RentalAnalytics`] store so the public report surface **never
//! fails**: every method returns a plain record, live when the store
//! answers, fallback when it does not. The degrade decision is one explicit
//! branch per operation rather than control flow hidden in error-handling
//! structure, which makes the availability-over-transparency trade-off
//! testable on its own.
//!
//! Failures are logged with the operation name and the underlying message
//! (data-source failures at `warn`, anything else at `error`), and that log
//! line is the only way to tell fallback data from live data; the payload
//! carries no provenance marker.

use crate::{
    error::AnalyticsError, fallback::FallbackCatalog, filter::ReportFilter, types::*,
    RentalAnalytics,
};
use std::sync::Arc;
use tracing::{error, warn};

/// Row cap applied to transaction listings when the caller supplies none
/// (or a non-positive value).
pub const DEFAULT_TRANSACTION_LIMIT: i64 = 20;

/// The public report surface consumed by the dispatch layer.
pub struct DashboardService {
    store: Arc<dyn RentalAnalytics>,
    fallback: FallbackCatalog,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RentalAnalytics>, fallback: FallbackCatalog) -> Self {
        Self { store, fallback }
    }

    pub async fn top_rented_films(&self, filter: &ReportFilter) -> Vec<RankedFilm> {
        match self.store.top_rented_films(filter).await {
            Ok(films) => films,
            Err(e) => {
                degraded("top_rented_films", &e);
                self.fallback.films.clone()
            }
        }
    }

    pub async fn revenue_by_category(&self, filter: &ReportFilter) -> Vec<CategoryRevenue> {
        match self.store.revenue_by_category(filter).await {
            Ok(categories) => categories,
            Err(e) => {
                degraded("revenue_by_category", &e);
                self.fallback.categories.clone()
            }
        }
    }

    pub async fn top_customers(&self, filter: &ReportFilter) -> Vec<TopCustomer> {
        match self.store.top_customers(filter).await {
            Ok(customers) => customers,
            Err(e) => {
                degraded("top_customers", &e);
                self.fallback.customers.clone()
            }
        }
    }

    pub async fn key_metrics(&self, filter: &ReportFilter) -> KeyMetrics {
        match self.store.key_metrics(filter).await {
            Ok(metrics) => metrics,
            Err(e) => {
                degraded("key_metrics", &e);
                self.fallback.metrics.clone()
            }
        }
    }

    pub async fn recent_transactions(
        &self,
        filter: &ReportFilter,
        limit: Option<i64>,
    ) -> Vec<Transaction> {
        let limit = match limit {
            Some(n) if n > 0 => n,
            _ => DEFAULT_TRANSACTION_LIMIT,
        };

        match self.store.recent_transactions(filter, limit).await {
            Ok(transactions) => transactions,
            Err(e) => {
                degraded("recent_transactions", &e);
                self.fallback.transactions.clone()
            }
        }
    }
}

fn degraded(operation: &str, err: &AnalyticsError) {
    match err {
        AnalyticsError::DataSource(_) => {
            warn!("{} unavailable, serving fallback dataset: {}", operation, err);
        }
        _ => {
            error!(
                "{} failed unexpectedly, serving fallback dataset: {}",
                operation, err
            );
        }
    }
}
