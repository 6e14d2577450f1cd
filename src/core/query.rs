// DocWatch - core/query.rs
//
// Expiry query engine: filtered, deterministically-ordered views over a
// document collection, parameterised by an injected reference date.
// Core layer: pure logic, no I/O or ambient clock.

use crate::core::model::Document;
use crate::util::error::QueryError;
use chrono::{Days, NaiveDate};

/// True when the document expired strictly before `reference`.
///
/// The boundary is exclusive here and inclusive in [`in_window`], so a
/// document due exactly on the reference date is "expiring", never "expired".
fn before(doc: &Document, reference: NaiveDate) -> bool {
    doc.due_date < reference
}

/// True when the due date falls inside `[start, end]`, inclusive on both ends.
fn in_range(doc: &Document, start: NaiveDate, end: NaiveDate) -> bool {
    doc.due_date >= start && doc.due_date <= end
}

/// Inclusive expiry-window predicate shared by filter and count.
///
/// The edge policy lives here and nowhere else: a window of `days` covers
/// `[reference, reference + days]`, so `days = 0` matches exactly the
/// documents due on the reference date.
fn in_window(doc: &Document, days: u64, reference: NaiveDate) -> bool {
    let end = reference
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX);
    in_range(doc, reference, end)
}

/// Reject negative windows, converting a valid one to an unsigned day count.
fn validate_window(days: i64) -> Result<u64, QueryError> {
    u64::try_from(days).map_err(|_| QueryError::NegativeWindow { days })
}

/// Sort a filtered view ascending by due date.
///
/// `sort_by_key` is stable, so documents sharing a due date keep their
/// input order.
fn sorted_by_due_date<'a>(mut docs: Vec<&'a Document>) -> Vec<&'a Document> {
    docs.sort_by_key(|d| d.due_date);
    docs
}

/// Documents whose due date is strictly earlier than `reference`,
/// ascending by due date.
pub fn filter_expired(docs: &[Document], reference: NaiveDate) -> Vec<&Document> {
    sorted_by_due_date(docs.iter().filter(|d| before(d, reference)).collect())
}

/// Documents due within `days` days of `reference`, bounds inclusive,
/// ascending by due date.
///
/// `days` must be >= 0; a negative window is a caller contract violation.
pub fn filter_expiring_within(
    docs: &[Document],
    days: i64,
    reference: NaiveDate,
) -> Result<Vec<&Document>, QueryError> {
    let days = validate_window(days)?;
    Ok(sorted_by_due_date(
        docs.iter().filter(|d| in_window(d, days, reference)).collect(),
    ))
}

/// Number of documents due within `days` days of `reference`.
///
/// Equivalent to `filter_expiring_within(..)?.len()` for every input; the
/// two share the window predicate so they cannot drift apart.
pub fn count_expiring_within(
    docs: &[Document],
    days: i64,
    reference: NaiveDate,
) -> Result<usize, QueryError> {
    let days = validate_window(days)?;
    Ok(docs.iter().filter(|d| in_window(d, days, reference)).count())
}

/// The full collection, ascending by due date.
pub fn all_sorted(docs: &[Document]) -> Vec<&Document> {
    sorted_by_due_date(docs.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_doc(title: &str, due: NaiveDate) -> Document {
        Document {
            id: None,
            title: title.to_string(),
            due_date: due,
            attachment_path: None,
        }
    }

    fn titles(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.title.clone()).collect()
    }

    #[test]
    fn test_expired_is_strictly_before_reference() {
        let reference = date(2026, 3, 15);
        let docs = vec![
            make_doc("old", date(2026, 3, 14)),
            make_doc("today", date(2026, 3, 15)),
            make_doc("future", date(2026, 3, 16)),
        ];
        let expired = filter_expired(&docs, reference);
        assert_eq!(titles(&expired), vec!["old"]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let reference = date(2026, 3, 15);
        let docs = vec![
            make_doc("yesterday", date(2026, 3, 14)),
            make_doc("start", date(2026, 3, 15)),
            make_doc("end", date(2026, 3, 22)),
            make_doc("past-end", date(2026, 3, 23)),
        ];
        let expiring = filter_expiring_within(&docs, 7, reference).unwrap();
        assert_eq!(titles(&expiring), vec!["start", "end"]);
    }

    #[test]
    fn test_zero_day_window_matches_reference_date_only() {
        let reference = date(2026, 3, 15);
        let docs = vec![
            make_doc("before", date(2026, 3, 14)),
            make_doc("exact", date(2026, 3, 15)),
            make_doc("after", date(2026, 3, 16)),
        ];
        let expiring = filter_expiring_within(&docs, 0, reference).unwrap();
        assert_eq!(titles(&expiring), vec!["exact"]);
    }

    #[test]
    fn test_expired_and_expiring_do_not_overlap() {
        // A document due exactly on the reference date is expiring, not
        // expired: the two views partition the boundary.
        let reference = date(2026, 3, 15);
        let docs = vec![make_doc("boundary", date(2026, 3, 15))];
        assert!(filter_expired(&docs, reference).is_empty());
        assert_eq!(
            filter_expiring_within(&docs, 30, reference).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_count_equals_filter_len() {
        let reference = date(2026, 3, 15);
        let docs = vec![
            make_doc("a", date(2026, 3, 10)),
            make_doc("b", date(2026, 3, 15)),
            make_doc("c", date(2026, 3, 20)),
            make_doc("d", date(2026, 4, 20)),
        ];
        for days in [0, 1, 5, 30, 365] {
            let filtered = filter_expiring_within(&docs, days, reference).unwrap();
            let count = count_expiring_within(&docs, days, reference).unwrap();
            assert_eq!(count, filtered.len(), "window of {days} days");
        }
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let docs = vec![make_doc("a", date(2026, 3, 10))];
        let reference = date(2026, 3, 15);
        assert!(matches!(
            filter_expiring_within(&docs, -1, reference),
            Err(QueryError::NegativeWindow { days: -1 })
        ));
        assert!(matches!(
            count_expiring_within(&docs, -5, reference),
            Err(QueryError::NegativeWindow { days: -5 })
        ));
    }

    #[test]
    fn test_results_sorted_ascending_with_stable_ties() {
        let docs = vec![
            make_doc("late", date(2026, 6, 1)),
            make_doc("tie-first", date(2026, 4, 1)),
            make_doc("tie-second", date(2026, 4, 1)),
            make_doc("early", date(2026, 3, 1)),
        ];
        let sorted = all_sorted(&docs);
        assert_eq!(
            titles(&sorted),
            vec!["early", "tie-first", "tie-second", "late"]
        );
    }

    #[test]
    fn test_empty_collection() {
        let reference = date(2026, 3, 15);
        assert!(filter_expired(&[], reference).is_empty());
        assert!(filter_expiring_within(&[], 30, reference).unwrap().is_empty());
        assert_eq!(count_expiring_within(&[], 30, reference).unwrap(), 0);
        assert!(all_sorted(&[]).is_empty());
    }

    #[test]
    fn test_window_every_result_in_range_and_every_miss_outside() {
        let reference = date(2026, 3, 15);
        let docs: Vec<Document> = (1..=31)
            .map(|d| make_doc(&format!("doc-{d}"), date(2026, 3, d)))
            .collect();

        let days = 7;
        let end = date(2026, 3, 22);
        let returned = filter_expiring_within(&docs, days, reference).unwrap();
        for doc in &returned {
            assert!(doc.due_date >= reference && doc.due_date <= end);
        }

        let returned_titles = titles(&returned);
        for doc in &docs {
            if !returned_titles.contains(&doc.title) {
                assert!(doc.due_date < reference || doc.due_date > end);
            }
        }
    }
}
