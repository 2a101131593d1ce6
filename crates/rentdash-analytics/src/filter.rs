//! Report Filter Model
//!
//! Normalizes the three optional report inputs into a predicate-contribution
//! set. Presence-checking only: this component never fails and never parses.
//! Dates are ISO-8601 strings passed through to the database's range
//! comparison unmodified.

use serde::{Deserialize, Serialize};

/// Optional constraints applied uniformly across every report query.
///
/// Two rules, both deliberate:
/// - the date range is active only when **both** bounds are present and
///   non-empty; a single bound contributes no predicate at all;
/// - a zero or negative `store_id` means "no store filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub store_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportFilter {
    pub fn new(
        store_id: Option<i64>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Self {
        Self {
            store_id,
            start_date,
            end_date,
        }
    }

    /// The store constraint, if one is actually in effect.
    pub fn effective_store(&self) -> Option<i64> {
        self.store_id.filter(|id| *id > 0)
    }

    /// The date range, if both bounds are present and non-empty.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Some((start, end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_requires_both_bounds() {
        let only_start = ReportFilter::new(None, Some("2024-01-01".to_string()), None);
        assert_eq!(only_start.date_range(), None);

        let only_end = ReportFilter::new(None, None, Some("2024-12-31".to_string()));
        assert_eq!(only_end.date_range(), None);

        let both = ReportFilter::new(
            None,
            Some("2024-01-01".to_string()),
            Some("2024-12-31".to_string()),
        );
        assert_eq!(both.date_range(), Some(("2024-01-01", "2024-12-31")));
    }

    #[test]
    fn empty_date_strings_are_absent() {
        let filter = ReportFilter::new(None, Some(String::new()), Some("2024-12-31".to_string()));
        assert_eq!(filter.date_range(), None);
    }

    #[test]
    fn non_positive_store_id_is_no_filter() {
        assert_eq!(ReportFilter::new(Some(0), None, None).effective_store(), None);
        assert_eq!(ReportFilter::new(Some(-3), None, None).effective_store(), None);
        assert_eq!(ReportFilter::new(Some(2), None, None).effective_store(), Some(2));
        assert_eq!(ReportFilter::default().effective_store(), None);
    }
}
