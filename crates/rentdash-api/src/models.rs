//! API models for the report endpoints

use rentdash_analytics::ReportFilter;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by every report endpoint.
///
/// `limit` only applies to the transaction listing; the other endpoints
/// ignore it.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportParams {
    /// Restrict the report to a single store
    pub store_id: Option<i64>,
    /// Range start, ISO-8601 (only applied together with endDate)
    pub start_date: Option<String>,
    /// Range end, ISO-8601 (only applied together with startDate)
    pub end_date: Option<String>,
    /// Row cap for transaction listings (default 20)
    pub limit: Option<i64>,
}

impl ReportParams {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter::new(
            self.store_id,
            self.start_date.clone(),
            self.end_date.clone(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
