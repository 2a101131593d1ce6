//! Predicate Composer
//!
//! Turns a [`ReportFilter`] into an ordered list of SQL fragments with a
//! parallel, same-order list of typed parameters. Keeping fragments and
//! parameters in one value makes it impossible to append a predicate without
//! its bindings (or vice versa), which is the classic failure mode of
//! hand-assembled positional-parameter SQL.
//!
//! Every report query is written against a tautological `WHERE 1=1` base, so
//! appending zero, one, or two composed predicates is always syntactically
//! valid. Predicates compose with `AND`.
//!
//! The same filter can be composed twice for one statement with different
//! [`FilterContext`]s: the category-revenue query does this, once for the
//! outer aggregate and once for the correlated-subquery denominator, whose
//! store filter travels a different join path. Parameter lists then
//! concatenate in placeholder emission order.
//!
//! Fragments use `?` placeholders. The SQLite backend binds them as-is; the
//! PostgreSQL backend rewrites them to `$1..$n` with
//! [`renumber_placeholders`].

use crate::filter::ReportFilter;

/// A single positional query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// Join-path-specific predicate templates for one query (or subquery).
///
/// `store_predicate` carries exactly one `?` placeholder, `date_predicate`
/// exactly two. The date column is the domain-appropriate timestamp for the
/// operation: rental date for rental-centric queries, payment date for
/// revenue, metrics, and transaction queries. The two are not
/// interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub store_predicate: &'a str,
    pub date_predicate: &'a str,
}

/// An ordered set of composed predicates and their bound parameters.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    clauses: Vec<String>,
    params: Vec<SqlParam>,
}

impl PredicateSet {
    /// Compose the active predicates for `filter` under `ctx`.
    ///
    /// Emission order is fixed: store predicate first, then the date range.
    /// Parameters are pushed in the same order as their placeholders, which
    /// is what positional binding depends on.
    pub fn compose(filter: &ReportFilter, ctx: &FilterContext<'_>) -> Self {
        let mut set = PredicateSet::default();

        if let Some(store_id) = filter.effective_store() {
            set.clauses.push(ctx.store_predicate.to_string());
            set.params.push(SqlParam::Int(store_id));
        }

        if let Some((start, end)) = filter.date_range() {
            set.clauses.push(ctx.date_predicate.to_string());
            set.params.push(SqlParam::Text(start.to_string()));
            set.params.push(SqlParam::Text(end.to_string()));
        }

        set
    }

    /// The composed clauses as appendable SQL: `" AND a AND b"`, or an empty
    /// string when no predicate is active.
    pub fn clause_sql(&self) -> String {
        self.clauses
            .iter()
            .map(|clause| format!(" AND {}", clause))
            .collect()
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

/// Rewrite `?` placeholders into `$1..$n`, left to right, for backends that
/// number their parameters. None of the report SQL embeds a literal `?`.
pub fn renumber_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut n = 0u32;
    for ch in sql.chars() {
        if ch == '?' {
            n += 1;
            out.push('$');
            out.push_str(&n.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: FilterContext<'static> = FilterContext {
        store_predicate: "i.store_id = ?",
        date_predicate: "r.rental_date BETWEEN ? AND ?",
    };

    fn filter(store: Option<i64>, start: Option<&str>, end: Option<&str>) -> ReportFilter {
        ReportFilter::new(
            store,
            start.map(str::to_string),
            end.map(str::to_string),
        )
    }

    #[test]
    fn no_filters_compose_to_nothing() {
        let set = PredicateSet::compose(&filter(None, None, None), &CTX);
        assert_eq!(set.clause_sql(), "");
        assert!(set.params().is_empty());
    }

    #[test]
    fn store_only() {
        let set = PredicateSet::compose(&filter(Some(1), None, None), &CTX);
        assert_eq!(set.clause_sql(), " AND i.store_id = ?");
        assert_eq!(set.params(), &[SqlParam::Int(1)]);
    }

    #[test]
    fn dates_only() {
        let set = PredicateSet::compose(&filter(None, Some("2005-05-01"), Some("2005-08-31")), &CTX);
        assert_eq!(set.clause_sql(), " AND r.rental_date BETWEEN ? AND ?");
        assert_eq!(
            set.params(),
            &[
                SqlParam::Text("2005-05-01".to_string()),
                SqlParam::Text("2005-08-31".to_string()),
            ]
        );
    }

    #[test]
    fn store_and_dates_keep_emission_order() {
        let set = PredicateSet::compose(&filter(Some(2), Some("2005-05-01"), Some("2005-08-31")), &CTX);
        assert_eq!(
            set.clause_sql(),
            " AND i.store_id = ? AND r.rental_date BETWEEN ? AND ?"
        );
        // Parameter order exactly matches fragment emission order.
        assert_eq!(
            set.params(),
            &[
                SqlParam::Int(2),
                SqlParam::Text("2005-05-01".to_string()),
                SqlParam::Text("2005-08-31".to_string()),
            ]
        );
    }

    #[test]
    fn single_date_bound_contributes_nothing() {
        let set = PredicateSet::compose(&filter(Some(1), Some("2005-05-01"), None), &CTX);
        assert_eq!(set.clause_sql(), " AND i.store_id = ?");
        assert_eq!(set.params(), &[SqlParam::Int(1)]);
    }

    #[test]
    fn falsy_store_id_contributes_nothing() {
        let set = PredicateSet::compose(&filter(Some(0), None, None), &CTX);
        assert_eq!(set.clause_sql(), "");
        assert!(set.params().is_empty());
    }

    #[test]
    fn placeholders_renumber_left_to_right() {
        assert_eq!(
            renumber_placeholders("WHERE a = ? AND b BETWEEN ? AND ?"),
            "WHERE a = $1 AND b BETWEEN $2 AND $3"
        );
        assert_eq!(renumber_placeholders("SELECT 1"), "SELECT 1");
    }
}
