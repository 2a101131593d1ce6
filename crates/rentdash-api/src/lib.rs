//! Rentdash REST API
//!
//! HTTP/JSON dispatch layer over the analytics service: one route per named
//! report operation, query-string filters, permissive CORS for the dashboard
//! frontend, and Swagger UI for exploration.

use axum::{routing::get, Router};
use rentdash_analytics::{DashboardService, RentalAnalytics};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
pub mod models;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Never-failing report surface consumed by the report handlers.
    pub dashboard: Arc<DashboardService>,
    /// Raw store handle, used by the readiness probe to observe real failures.
    pub analytics: Arc<dyn RentalAnalytics>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/reports/top-films",
            get(handlers::reports::top_rented_films),
        )
        .route(
            "/reports/revenue-by-category",
            get(handlers::reports::revenue_by_category),
        )
        .route(
            "/reports/top-customers",
            get(handlers::reports::top_customers),
        )
        .route("/reports/key-metrics", get(handlers::reports::key_metrics))
        .route(
            "/reports/transactions",
            get(handlers::reports::recent_transactions),
        )
        .with_state(state.clone());

    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger)
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the API server
pub async fn serve(router: Router, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Rentdash API listening on {}", addr);
    tracing::info!("   Swagger UI: http://localhost:{}/swagger-ui", port);
    tracing::info!("   Health: http://localhost:{}/health", port);

    axum::serve(listener, router).await?;
    Ok(())
}

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::reports::top_rented_films,
        handlers::reports::revenue_by_category,
        handlers::reports::top_customers,
        handlers::reports::key_metrics,
        handlers::reports::recent_transactions,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(schemas(models::HealthResponse)),
    tags(
        (name = "reports", description = "Filtered rental-store reports"),
        (name = "health", description = "Service health and readiness")
    )
)]
pub struct ApiDoc;
