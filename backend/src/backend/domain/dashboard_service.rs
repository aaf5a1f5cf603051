//! Dashboard listing derivation.
//!
//! The admin dashboard view is a pure function of the raw records and the
//! current search term, permission filter, and sort choice. Filtering runs
//! first, then sorting; nothing here touches storage or mutates input, so the
//! result can be recomputed (or memoized) whenever any input changes.

use shared::{PermissionFilter, SubmissionSort};
use tracing::debug;

use crate::backend::domain::commands::submissions::SubmissionListQuery;
use crate::backend::domain::models::submission::Submission;

/// Derives the filtered, sorted dashboard listing.
#[derive(Clone, Default)]
pub struct DashboardService {}

impl DashboardService {
    pub fn new() -> Self {
        Self {}
    }

    /// Apply search, permission filter, and sort to a set of submissions.
    pub fn derive_listing(
        &self,
        submissions: Vec<Submission>,
        query: &SubmissionListQuery,
    ) -> Vec<Submission> {
        let mut result: Vec<Submission> = submissions
            .into_iter()
            .filter(|s| Self::matches_search(s, query.search.as_deref()))
            .filter(|s| Self::matches_permission(s, query.permission))
            .collect();

        match query.sort {
            SubmissionSort::Name => {
                result.sort_by(|a, b| a.child_full_name.cmp(&b.child_full_name));
            }
            SubmissionSort::Date => {
                // RFC 3339 UTC timestamps order lexicographically
                result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }

        debug!("Derived listing with {} submissions", result.len());

        result
    }

    /// Case-insensitive substring match on child or parent name, or an exact
    /// substring match on the phone number. An empty term matches all.
    fn matches_search(submission: &Submission, term: Option<&str>) -> bool {
        let term = match term {
            Some(t) if !t.trim().is_empty() => t.trim(),
            _ => return true,
        };
        let lowered = term.to_lowercase();

        submission.child_full_name.to_lowercase().contains(&lowered)
            || submission.parent_full_name.to_lowercase().contains(&lowered)
            || submission.parent_phone_number.contains(term)
    }

    fn matches_permission(submission: &Submission, filter: PermissionFilter) -> bool {
        match filter {
            PermissionFilter::All => true,
            PermissionFilter::Granted => submission.permission_to_participate,
            PermissionFilter::Denied => !submission.permission_to_participate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::submission::test_submission;

    fn sample_set() -> Vec<Submission> {
        let mut alice = test_submission("Alice Smith", "2026-01-03T10:00:00+00:00");
        alice.parent_full_name = "Bob Lee".to_string();
        alice.parent_phone_number = "555-1234".to_string();
        alice.permission_to_participate = true;

        let mut carol = test_submission("Carol", "2026-01-01T10:00:00+00:00");
        carol.parent_full_name = "Dana".to_string();
        carol.parent_phone_number = "555-9999".to_string();
        carol.permission_to_participate = false;

        let mut zoe = test_submission("Zoe Park", "2026-01-02T10:00:00+00:00");
        zoe.parent_full_name = "Max Park".to_string();
        zoe.parent_phone_number = "444-0000".to_string();
        zoe.permission_to_participate = true;

        vec![alice, carol, zoe]
    }

    fn query() -> SubmissionListQuery {
        SubmissionListQuery::default()
    }

    #[test]
    fn test_empty_search_matches_all() {
        let service = DashboardService::new();
        let listing = service.derive_listing(sample_set(), &query());
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_on_names() {
        let service = DashboardService::new();

        let mut q = query();
        q.search = Some("smith".to_string());
        let listing = service.derive_listing(sample_set(), &q);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].child_full_name, "Alice Smith");

        // Parent name matches too
        q.search = Some("DANA".to_string());
        let listing = service.derive_listing(sample_set(), &q);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].child_full_name, "Carol");
    }

    #[test]
    fn test_search_matches_phone_substring() {
        let service = DashboardService::new();

        let mut q = query();
        q.search = Some("555".to_string());
        let listing = service.derive_listing(sample_set(), &q);
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().all(|s| s.parent_phone_number.contains("555")));
    }

    #[test]
    fn test_permission_filter_partitions_the_set() {
        let service = DashboardService::new();

        let mut q = query();
        q.permission = PermissionFilter::Granted;
        let granted = service.derive_listing(sample_set(), &q);
        assert_eq!(granted.len(), 2);
        assert!(granted.iter().all(|s| s.permission_to_participate));

        q.permission = PermissionFilter::Denied;
        let denied = service.derive_listing(sample_set(), &q);
        assert_eq!(denied.len(), 1);
        assert!(denied.iter().all(|s| !s.permission_to_participate));

        q.permission = PermissionFilter::All;
        let all = service.derive_listing(sample_set(), &q);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let service = DashboardService::new();

        let mut q = query();
        q.sort = SubmissionSort::Name;
        let listing = service.derive_listing(sample_set(), &q);
        let names: Vec<&str> = listing.iter().map(|s| s.child_full_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Smith", "Carol", "Zoe Park"]);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let service = DashboardService::new();

        let mut q = query();
        q.sort = SubmissionSort::Date;
        let listing = service.derive_listing(sample_set(), &q);
        let names: Vec<&str> = listing.iter().map(|s| s.child_full_name.as_str()).collect();
        // Alice was submitted last, Carol first
        assert_eq!(names, vec!["Alice Smith", "Zoe Park", "Carol"]);
    }

    #[test]
    fn test_filter_applies_before_sort() {
        let service = DashboardService::new();

        let mut q = query();
        q.permission = PermissionFilter::Granted;
        q.sort = SubmissionSort::Name;
        let listing = service.derive_listing(sample_set(), &q);
        let names: Vec<&str> = listing.iter().map(|s| s.child_full_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Smith", "Zoe Park"]);
    }

    #[test]
    fn test_derivation_does_not_mutate_order_sensitivity() {
        let service = DashboardService::new();

        // Same inputs, same output: the derivation is pure
        let q = query();
        let first = service.derive_listing(sample_set(), &q);
        let second = service.derive_listing(sample_set(), &q);
        assert_eq!(first, second);
    }
}
