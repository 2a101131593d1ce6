//! Fallback Datasets
//!
//! A fixed set of representative records served whenever the live data
//! source is unreachable or errors. The catalog is injected into
//! [`crate::service::DashboardService`] at construction time and never
//! mutated afterwards, so tests can substitute their own fixtures and no
//! process-wide state exists.

use crate::types::*;

/// Immutable fallback datasets, one per report operation.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    pub films: Vec<RankedFilm>,
    pub categories: Vec<CategoryRevenue>,
    pub customers: Vec<TopCustomer>,
    pub metrics: KeyMetrics,
    pub transactions: Vec<Transaction>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self {
            films: vec![
                film(1, "ACADEMY DINOSAUR", 23),
                film(2, "ACE GOLDFINGER", 20),
                film(3, "ADAPTATION HOLES", 18),
                film(4, "AFFAIR PREJUDICE", 17),
                film(5, "AFRICAN EGG", 16),
            ],
            categories: vec![
                category("Action", 5814.48, 15.2),
                category("Animation", 4656.39, 12.1),
                category("Classics", 3827.39, 10.0),
                category("Comedy", 4131.98, 10.8),
                category("Documentary", 2032.42, 5.3),
            ],
            customers: vec![
                customer(1, "MARY", "SMITH", 32, 144.62),
                customer(2, "PATRICIA", "JOHNSON", 27, 118.68),
                customer(3, "LINDA", "WILLIAMS", 26, 121.45),
                customer(4, "BARBARA", "JONES", 24, 105.78),
                customer(5, "ELIZABETH", "BROWN", 23, 99.50),
            ],
            metrics: KeyMetrics {
                total_revenue: 67406.13,
                active_rentals: 183,
            },
            transactions: vec![
                transaction(1, "MARY SMITH", "ACADEMY DINOSAUR", 4.99, "2024-01-15T10:30:00Z"),
                transaction(2, "PATRICIA JOHNSON", "ACE GOLDFINGER", 5.99, "2024-01-15T11:00:00Z"),
                transaction(3, "LINDA WILLIAMS", "ADAPTATION HOLES", 6.99, "2024-01-15T11:30:00Z"),
                transaction(4, "BARBARA JONES", "AFFAIR PREJUDICE", 4.99, "2024-01-15T12:00:00Z"),
                transaction(5, "ELIZABETH BROWN", "AFRICAN EGG", 5.99, "2024-01-15T12:30:00Z"),
            ],
        }
    }
}

fn film(film_id: i64, title: &str, rental_count: i64) -> RankedFilm {
    RankedFilm {
        film_id,
        title: title.to_string(),
        rental_count,
    }
}

fn category(category_name: &str, revenue: f64, percentage: f64) -> CategoryRevenue {
    CategoryRevenue {
        category_name: category_name.to_string(),
        revenue,
        percentage,
    }
}

fn customer(
    customer_id: i64,
    first_name: &str,
    last_name: &str,
    total_rentals: i64,
    total_spent: f64,
) -> TopCustomer {
    TopCustomer {
        customer_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        total_rentals,
        total_spent,
    }
}

fn transaction(
    payment_id: i64,
    customer_name: &str,
    film_title: &str,
    amount: f64,
    payment_date: &str,
) -> Transaction {
    Transaction {
        payment_id,
        customer_name: customer_name.to_string(),
        film_title: film_title.to_string(),
        amount,
        payment_date: payment_date.to_string(),
    }
}
