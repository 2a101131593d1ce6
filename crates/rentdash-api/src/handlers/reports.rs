//! Report endpoints
//!
//! Each handler maps one named dashboard operation onto the analytics
//! service. None of them can fail: the service degrades to its fallback
//! catalog internally, so every response is a 200 with a well-formed body
//! whether the data is live or not.

use axum::{
    extract::{Query, State},
    Json,
};
use rentdash_analytics::{CategoryRevenue, KeyMetrics, RankedFilm, TopCustomer, Transaction};

use crate::{models::ReportParams, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/reports/top-films",
    params(ReportParams),
    responses(
        (status = 200, description = "Films ranked by rental count, capped at 10")
    ),
    tag = "reports"
)]
pub async fn top_rented_films(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<RankedFilm>> {
    Json(state.dashboard.top_rented_films(&params.filter()).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue-by-category",
    params(ReportParams),
    responses(
        (status = 200, description = "Revenue and share-of-total per category, ordered by revenue")
    ),
    tag = "reports"
)]
pub async fn revenue_by_category(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<CategoryRevenue>> {
    Json(state.dashboard.revenue_by_category(&params.filter()).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/top-customers",
    params(ReportParams),
    responses(
        (status = 200, description = "Customers ranked by total spend, capped at 10")
    ),
    tag = "reports"
)]
pub async fn top_customers(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<TopCustomer>> {
    Json(state.dashboard.top_customers(&params.filter()).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/key-metrics",
    params(ReportParams),
    responses(
        (status = 200, description = "Headline revenue and active-rental totals")
    ),
    tag = "reports"
)]
pub async fn key_metrics(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Json<KeyMetrics> {
    Json(state.dashboard.key_metrics(&params.filter()).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/transactions",
    params(ReportParams),
    responses(
        (status = 200, description = "Latest payments with customer and film context, newest first")
    ),
    tag = "reports"
)]
pub async fn recent_transactions(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<Transaction>> {
    Json(
        state
            .dashboard
            .recent_transactions(&params.filter(), params.limit)
            .await,
    )
}
