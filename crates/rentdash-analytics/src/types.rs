//! Report Record Types
//!
//! Every record is a transient, request-scoped value built fresh per call,
//! either from a live aggregation or from the fallback catalog. Field names
//! serialize in camelCase because that is the wire contract the dashboard
//! frontend consumes.
//!
//! Monetary values are `f64` end-to-end: the wire schema exposes floats,
//! SQLite stores `REAL`, and the PostgreSQL backend casts `NUMERIC` to
//! `double precision` at the SQL boundary.

use serde::{Deserialize, Serialize};

/// A film ranked by how often it was rented inside the filter scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFilm {
    pub film_id: i64,
    pub title: String,
    pub rental_count: i64,
}

/// A category's share of payment revenue inside the filter scope.
///
/// `percentage` is this category's summed payments divided by the filtered
/// grand total, times 100, rounded to two decimals. Categories with no
/// activity report 0 for both `revenue` and `percentage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category_name: String,
    pub revenue: f64,
    pub percentage: f64,
}

/// A customer ranked by total spend inside the filter scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub total_rentals: i64,
    pub total_spent: f64,
}

/// Headline dashboard figures. A singleton aggregate, not a list.
///
/// `active_rentals` counts distinct rentals with no recorded return date.
/// An empty filter scope yields `{0, 0}`, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_revenue: f64,
    pub active_rentals: i64,
}

/// A single payment row with customer and film context joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub payment_id: i64,
    pub customer_name: String,
    pub film_title: String,
    pub amount: f64,
    pub payment_date: String,
}
