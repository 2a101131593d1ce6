//! PostgreSQL Report Store Implementation
//!
//! Production backend for the report queries, enabled with the `postgres`
//! feature. Semantics match the SQLite store exactly; the differences are
//! dialect-level:
//!
//! - placeholders are `$1..$n`, produced by
//!   [`renumber_placeholders`](crate::sql::renumber_placeholders) from the
//!   shared `?`-style fragments;
//! - date parameters arrive as ISO-8601 text and are cast to `timestamp`
//!   inside the predicate, so the layer still passes them through unparsed;
//! - `NUMERIC` aggregates are cast to `double precision` at the SQL
//!   boundary, keeping the record types identical across backends.

use crate::{
    error::Result,
    filter::ReportFilter,
    sql::{renumber_placeholders, FilterContext, PredicateSet, SqlParam},
    types::*,
    RentalAnalytics,
};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row;
use std::str::FromStr;

/// PostgreSQL-backed implementation of the report queries.
pub struct PostgresAnalytics {
    pool: PgPool,
}

impl PostgresAnalytics {
    pub async fn new(url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)?;
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations-postgres").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn with_pool_options(url: &str, pool_options: PgPoolOptions) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)?;
        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations-postgres").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const STORE_VIA_INVENTORY: &str = "i.store_id = ?";
const DATES_ON_RENTAL: &str = "r.rental_date BETWEEN ?::timestamp AND ?::timestamp";
const DATES_ON_PAYMENT: &str = "p.payment_date BETWEEN ?::timestamp AND ?::timestamp";

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    params: &[SqlParam],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

#[async_trait]
impl RentalAnalytics for PostgresAnalytics {
    async fn top_rented_films(&self, filter: &ReportFilter) -> Result<Vec<RankedFilm>> {
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: STORE_VIA_INVENTORY,
                date_predicate: DATES_ON_RENTAL,
            },
        );

        let sql = renumber_placeholders(&format!(
            "SELECT f.film_id, f.title, COUNT(r.rental_id) AS rental_count \
             FROM film f \
             LEFT JOIN inventory i ON f.film_id = i.film_id \
             LEFT JOIN rental r ON i.inventory_id = r.inventory_id \
             WHERE 1=1{} \
             GROUP BY f.film_id, f.title \
             ORDER BY rental_count DESC \
             LIMIT 10",
            preds.clause_sql()
        ));

        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query(&sql), preds.params())
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter()
            .map(|r| {
                Ok(RankedFilm {
                    film_id: r.try_get("film_id")?,
                    title: r.try_get("title")?,
                    rental_count: r.try_get("rental_count")?,
                })
            })
            .collect()
    }

    async fn revenue_by_category(&self, filter: &ReportFilter) -> Result<Vec<CategoryRevenue>> {
        // Denominator placeholders precede the outer WHERE in the statement,
        // so the denominator parameters bind first.
        let denom = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate:
                    "p2.staff_id IN (SELECT staff_id FROM staff WHERE store_id = ?)",
                date_predicate: "p2.payment_date BETWEEN ?::timestamp AND ?::timestamp",
            },
        );
        let outer = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: STORE_VIA_INVENTORY,
                date_predicate: DATES_ON_PAYMENT,
            },
        );

        let sql = renumber_placeholders(&format!(
            "SELECT c.name AS category_name, \
                    COALESCE(SUM(p.amount), 0)::double precision AS revenue, \
                    COALESCE(ROUND(SUM(p.amount) * 100 / NULLIF((SELECT SUM(p2.amount) FROM payment p2 WHERE 1=1{denom}), 0), 2), 0)::double precision AS percentage \
             FROM category c \
             LEFT JOIN film_category fc ON c.category_id = fc.category_id \
             LEFT JOIN film f ON fc.film_id = f.film_id \
             LEFT JOIN inventory i ON f.film_id = i.film_id \
             LEFT JOIN rental r ON i.inventory_id = r.inventory_id \
             LEFT JOIN payment p ON r.rental_id = p.rental_id \
             WHERE 1=1{outer} \
             GROUP BY c.category_id, c.name \
             ORDER BY revenue DESC",
            denom = denom.clause_sql(),
            outer = outer.clause_sql(),
        ));

        let mut conn = self.pool.acquire().await?;
        let query = bind_params(sqlx::query(&sql), denom.params());
        let rows = bind_params(query, outer.params())
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter()
            .map(|r| {
                Ok(CategoryRevenue {
                    category_name: r.try_get("category_name")?,
                    revenue: r.try_get("revenue")?,
                    percentage: r.try_get("percentage")?,
                })
            })
            .collect()
    }

    async fn top_customers(&self, filter: &ReportFilter) -> Result<Vec<TopCustomer>> {
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: "c.store_id = ?",
                date_predicate: DATES_ON_RENTAL,
            },
        );

        let sql = renumber_placeholders(&format!(
            "SELECT c.customer_id, c.first_name, c.last_name, \
                    COUNT(r.rental_id) AS total_rentals, \
                    COALESCE(SUM(p.amount), 0)::double precision AS total_spent \
             FROM customer c \
             LEFT JOIN rental r ON c.customer_id = r.customer_id \
             LEFT JOIN payment p ON r.rental_id = p.rental_id \
             WHERE 1=1{} \
             GROUP BY c.customer_id, c.first_name, c.last_name \
             ORDER BY total_spent DESC \
             LIMIT 10",
            preds.clause_sql()
        ));

        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query(&sql), preds.params())
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter()
            .map(|r| {
                Ok(TopCustomer {
                    customer_id: r.try_get("customer_id")?,
                    first_name: r.try_get("first_name")?,
                    last_name: r.try_get("last_name")?,
                    total_rentals: r.try_get("total_rentals")?,
                    total_spent: r.try_get("total_spent")?,
                })
            })
            .collect()
    }

    async fn key_metrics(&self, filter: &ReportFilter) -> Result<KeyMetrics> {
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: STORE_VIA_INVENTORY,
                date_predicate: DATES_ON_PAYMENT,
            },
        );

        let sql = renumber_placeholders(&format!(
            "SELECT COALESCE(SUM(p.amount), 0)::double precision AS total_revenue, \
                    COUNT(DISTINCT CASE WHEN r.return_date IS NULL THEN r.rental_id END) AS active_rentals \
             FROM payment p \
             LEFT JOIN rental r ON p.rental_id = r.rental_id \
             LEFT JOIN inventory i ON r.inventory_id = i.inventory_id \
             WHERE 1=1{}",
            preds.clause_sql()
        ));

        let mut conn = self.pool.acquire().await?;
        let row = bind_params(sqlx::query(&sql), preds.params())
            .fetch_one(&mut *conn)
            .await?;

        Ok(KeyMetrics {
            total_revenue: row.try_get("total_revenue")?,
            active_rentals: row.try_get("active_rentals")?,
        })
    }

    async fn recent_transactions(
        &self,
        filter: &ReportFilter,
        limit: i64,
    ) -> Result<Vec<Transaction>> {
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: STORE_VIA_INVENTORY,
                date_predicate: DATES_ON_PAYMENT,
            },
        );

        let sql = renumber_placeholders(&format!(
            "SELECT p.payment_id, \
                    COALESCE(c.first_name || ' ' || c.last_name, '') AS customer_name, \
                    COALESCE(f.title, '') AS film_title, \
                    p.amount::double precision AS amount, \
                    p.payment_date::text AS payment_date \
             FROM payment p \
             LEFT JOIN rental r ON p.rental_id = r.rental_id \
             LEFT JOIN customer c ON r.customer_id = c.customer_id \
             LEFT JOIN inventory i ON r.inventory_id = i.inventory_id \
             LEFT JOIN film f ON i.film_id = f.film_id \
             WHERE 1=1{} \
             ORDER BY p.payment_date DESC \
             LIMIT ?",
            preds.clause_sql()
        ));

        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query(&sql), preds.params())
            .bind(limit)
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter()
            .map(|r| {
                Ok(Transaction {
                    payment_id: r.try_get("payment_id")?,
                    customer_name: r.try_get("customer_name")?,
                    film_title: r.try_get("film_title")?,
                    amount: r.try_get("amount")?,
                    payment_date: r.try_get("payment_date")?,
                })
            })
            .collect()
    }
}
