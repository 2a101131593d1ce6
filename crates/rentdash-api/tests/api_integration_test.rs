//! Integration tests for the rentdash REST API
//!
//! Builds a real router over an in-memory store and sends requests via
//! tower::ServiceExt. The empty in-memory database exercises the live path;
//! a store that always errors exercises the fallback path. The endpoints
//! must answer 200 with well-formed JSON either way.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rentdash_analytics::{
    AnalyticsError, CategoryRevenue, DashboardService, FallbackCatalog, KeyMetrics, RankedFilm,
    RentalAnalytics, ReportFilter, Result, SqliteAnalytics, TopCustomer, Transaction,
};
use rentdash_api::{create_router, AppState};

/// Router over an empty in-memory rental database (live path).
async fn live_app() -> axum::Router {
    let analytics: Arc<dyn RentalAnalytics> =
        Arc::new(SqliteAnalytics::new_in_memory().await.unwrap());
    let dashboard = Arc::new(DashboardService::new(
        analytics.clone(),
        FallbackCatalog::default(),
    ));
    create_router(AppState {
        dashboard,
        analytics,
    })
}

/// Router over a store that fails every query (fallback path).
fn failing_app() -> axum::Router {
    let analytics: Arc<dyn RentalAnalytics> = Arc::new(BrokenStore);
    let dashboard = Arc::new(DashboardService::new(
        analytics.clone(),
        FallbackCatalog::default(),
    ));
    create_router(AppState {
        dashboard,
        analytics,
    })
}

struct BrokenStore;

#[async_trait]
impl RentalAnalytics for BrokenStore {
    async fn top_rented_films(&self, _: &ReportFilter) -> Result<Vec<RankedFilm>> {
        Err(broken())
    }

    async fn revenue_by_category(&self, _: &ReportFilter) -> Result<Vec<CategoryRevenue>> {
        Err(broken())
    }

    async fn top_customers(&self, _: &ReportFilter) -> Result<Vec<TopCustomer>> {
        Err(broken())
    }

    async fn key_metrics(&self, _: &ReportFilter) -> Result<KeyMetrics> {
        Err(broken())
    }

    async fn recent_transactions(&self, _: &ReportFilter, _: i64) -> Result<Vec<Transaction>> {
        Err(broken())
    }
}

fn broken() -> AnalyticsError {
    AnalyticsError::Unexpected("database gone".to_string())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ---------------------------------------------------------------
// Health endpoints
// ---------------------------------------------------------------

#[tokio::test]
async fn test_health_check() {
    let (status, json) = get_json(live_app().await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_readiness_with_live_store() {
    let (status, json) = get_json(live_app().await, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
}

#[tokio::test]
async fn test_readiness_with_broken_store() {
    let resp = failing_app()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ---------------------------------------------------------------
// Report endpoints, live path
// ---------------------------------------------------------------

#[tokio::test]
async fn test_top_films_live_empty_database() {
    let (status, json) = get_json(live_app().await, "/api/v1/reports/top-films").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_top_films_accepts_filter_params() {
    let (status, json) = get_json(
        live_app().await,
        "/api/v1/reports/top-films?storeId=1&startDate=2005-05-01&endDate=2006-02-28",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_key_metrics_live_empty_database_reports_zeros() {
    let (status, json) = get_json(live_app().await, "/api/v1/reports/key-metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalRevenue"], 0.0);
    assert_eq!(json["activeRentals"], 0);
}

// ---------------------------------------------------------------
// Report endpoints, fallback path
// ---------------------------------------------------------------

#[tokio::test]
async fn test_top_films_degrades_to_fallback() {
    let (status, json) = get_json(failing_app(), "/api/v1/reports/top-films").await;
    assert_eq!(status, StatusCode::OK);

    let films = json.as_array().unwrap();
    assert_eq!(films.len(), 5);
    assert_eq!(films[0]["title"], "ACADEMY DINOSAUR");
    assert_eq!(films[0]["rentalCount"], 23);
}

#[tokio::test]
async fn test_key_metrics_degrades_to_fallback() {
    let (status, json) = get_json(failing_app(), "/api/v1/reports/key-metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalRevenue"], 67406.13);
    assert_eq!(json["activeRentals"], 183);
}

#[tokio::test]
async fn test_transactions_fallback_ignores_limit() {
    let (status, json) = get_json(failing_app(), "/api/v1/reports/transactions?limit=2").await;
    assert_eq!(status, StatusCode::OK);

    // The fallback dataset is returned verbatim; the limit shapes live
    // queries only.
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["customerName"], "MARY SMITH");
}

#[tokio::test]
async fn test_revenue_by_category_degrades_to_fallback() {
    let (status, json) = get_json(failing_app(), "/api/v1/reports/revenue-by-category").await;
    assert_eq!(status, StatusCode::OK);

    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0]["categoryName"], "Action");
}

#[tokio::test]
async fn test_top_customers_degrades_to_fallback() {
    let (status, json) = get_json(failing_app(), "/api/v1/reports/top-customers").await;
    assert_eq!(status, StatusCode::OK);

    let customers = json.as_array().unwrap();
    assert_eq!(customers.len(), 5);
    assert_eq!(customers[0]["firstName"], "MARY");
    assert_eq!(customers[0]["totalSpent"], 144.62);
}
