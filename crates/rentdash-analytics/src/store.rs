//! SQLite Report Store Implementation
//!
//! Implements the [`RentalAnalytics`] trait over a SQLite connection pool.
//! This is the development and test backend; production deployments point
//! the same trait at PostgreSQL (see the `postgres` feature).
//!
//! ## Query shape
//!
//! Every operation builds one statement from a fixed base join and the
//! predicates composed by [`PredicateSet`], then runs it on a connection
//! acquired explicitly from the pool. The pooled connection is released by
//! its drop guard on every exit path, success or failure.
//!
//! All joins are left joins from the aggregation root, so entities with zero
//! matching activity still appear with zero-valued aggregates in the
//! unfiltered case. Sums are `COALESCE`d to `0.0`: a `SUM` over no rows is
//! NULL in SQL, but the report contract is a number.
//!
//! ## Runtime queries
//!
//! The statements are assembled at runtime (predicate count depends on the
//! filter), so this module uses `sqlx::query` rather than the compile-time
//! macros, decoding rows by column name with `try_get`.

use crate::{
    error::Result,
    filter::ReportFilter,
    sql::{FilterContext, PredicateSet, SqlParam},
    types::*,
    RentalAnalytics,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

/// SQLite-backed implementation of the report queries.
pub struct SqliteAnalytics {
    pool: SqlitePool,
}

impl SqliteAnalytics {
    /// Open (or create) a database file and apply the reporting schema.
    ///
    /// The schema DDL is idempotent, so pointing this at an existing rental
    /// database is safe.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", path.as_ref().display()))?
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database for tests.
    ///
    /// Capped at one connection: each SQLite `:memory:` connection is its own
    /// database, so every handle must share the single connection.
    pub async fn new_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
    params: &[SqlParam],
) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

#[async_trait]
impl RentalAnalytics for SqliteAnalytics {
    async fn top_rented_films(&self, filter: &ReportFilter) -> Result<Vec<RankedFilm>> {
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: "i.store_id = ?",
                date_predicate: "r.rental_date BETWEEN ? AND ?",
            },
        );

        let sql = format!(
            "SELECT f.film_id, f.title, COUNT(r.rental_id) AS rental_count \
             FROM film f \
             LEFT JOIN inventory i ON f.film_id = i.film_id \
             LEFT JOIN rental r ON i.inventory_id = r.inventory_id \
             WHERE 1=1{} \
             GROUP BY f.film_id, f.title \
             ORDER BY rental_count DESC \
             LIMIT 10",
            preds.clause_sql()
        );

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
        // The denominator recomputes the filtered grand total inside a scalar
        // subquery; its store filter travels the staff join path because no
        // inventory alias is in scope there. Its placeholders appear in the
        // SELECT list, ahead of the outer WHERE, so its parameters bind
        // first.
        let denom = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate:
                    "p2.staff_id IN (SELECT staff_id FROM staff WHERE store_id = ?)",
                date_predicate: "p2.payment_date BETWEEN ? AND ?",
            },
        );
        let outer = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: "i.store_id = ?",
                date_predicate: "p.payment_date BETWEEN ? AND ?",
            },
        );

        let sql = format!(
            "SELECT c.name AS category_name, \
                    COALESCE(SUM(p.amount), 0.0) AS revenue, \
                    COALESCE(ROUND(SUM(p.amount) * 100.0 / NULLIF((SELECT SUM(p2.amount) FROM payment p2 WHERE 1=1{denom}), 0), 2), 0.0) AS percentage \
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
        );

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
        // Store scope here is the customer's home store, not the inventory
        // store: the join path never touches inventory.
        let preds = PredicateSet::compose(
            filter,
            &FilterContext {
                store_predicate: "c.store_id = ?",
                date_predicate: "r.rental_date BETWEEN ? AND ?",
            },
        );

        let sql = format!(
            "SELECT c.customer_id, c.first_name, c.last_name, \
                    COUNT(r.rental_id) AS total_rentals, \
                    COALESCE(SUM(p.amount), 0.0) AS total_spent \
             FROM customer c \
             LEFT JOIN rental r ON c.customer_id = r.customer_id \
             LEFT JOIN payment p ON r.rental_id = p.rental_id \
             WHERE 1=1{} \
             GROUP BY c.customer_id, c.first_name, c.last_name \
             ORDER BY total_spent DESC \
             LIMIT 10",
            preds.clause_sql()
        );

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
                store_predicate: "i.store_id = ?",
                date_predicate: "p.payment_date BETWEEN ? AND ?",
            },
        );

        let sql = format!(
            "SELECT COALESCE(SUM(p.amount), 0.0) AS total_revenue, \
                    COUNT(DISTINCT CASE WHEN r.return_date IS NULL THEN r.rental_id END) AS active_rentals \
             FROM payment p \
             LEFT JOIN rental r ON p.rental_id = r.rental_id \
             LEFT JOIN inventory i ON r.inventory_id = i.inventory_id \
             WHERE 1=1{}",
            preds.clause_sql()
        );

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
                store_predicate: "i.store_id = ?",
                date_predicate: "p.payment_date BETWEEN ? AND ?",
            },
        );

        let sql = format!(
            "SELECT p.payment_id, \
                    COALESCE(c.first_name || ' ' || c.last_name, '') AS customer_name, \
                    COALESCE(f.title, '') AS film_title, \
                    p.amount, \
                    p.payment_date \
             FROM payment p \
             LEFT JOIN rental r ON p.rental_id = r.rental_id \
             LEFT JOIN customer c ON r.customer_id = c.customer_id \
             LEFT JOIN inventory i ON r.inventory_id = i.inventory_id \
             LEFT JOIN film f ON i.film_id = f.film_id \
             WHERE 1=1{} \
             ORDER BY p.payment_date DESC \
             LIMIT ?",
            preds.clause_sql()
        );

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
