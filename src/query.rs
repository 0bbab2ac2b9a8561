//! Client-side sort, search and status filtering over the issue collection.
//!
//! `view` is a pure function of the collection and a `QueryState`. Stages run in a fixed
//! order: sort, then search, then status filter.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::api::{Issue, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Location,
    Status,
}

impl SortColumn {
    fn key(self, issue: &Issue) -> &str {
        match self {
            SortColumn::Title => &issue.title,
            SortColumn::Location => &issue.location.address,
            SortColumn::Status => issue.status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Which fields the search text is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Title, description or address (admin dashboard)
    #[default]
    All,
    /// Address only (citizen city search)
    Address,
}

/// Ephemeral query parameters owned by a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub search_text: String,
    pub search_scope: SearchScope,
    /// Empty means every status passes
    pub status_filters: HashSet<Status>,
    pub sort_column: Option<SortColumn>,
    pub sort_direction: SortDirection,
}

impl QueryState {
    pub fn with_scope(search_scope: SearchScope) -> Self {
        Self {
            search_scope,
            ..Self::default()
        }
    }

    /// Sort by `column`; choosing the active column again flips the direction.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == Some(column) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_column = Some(column);
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Add `status` to the filter set, or remove it if already present.
    pub fn toggle_status(&mut self, status: Status) {
        if !self.status_filters.remove(&status) {
            self.status_filters.insert(status);
        }
    }

    /// Reset to the initial state, keeping the search scope.
    pub fn clear(&mut self) {
        *self = Self::with_scope(self.search_scope);
    }

    fn matches_search(&self, issue: &Issue, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(needle);
        match self.search_scope {
            SearchScope::All => {
                contains(&issue.title)
                    || contains(&issue.description)
                    || contains(&issue.location.address)
            }
            SearchScope::Address => contains(&issue.location.address),
        }
    }

    fn matches_status(&self, issue: &Issue) -> bool {
        self.status_filters.is_empty() || self.status_filters.contains(&issue.status)
    }
}

/// Case-insensitive collation; strings differing only in case put lower case first.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Build the ordered, filtered list a view renders.
pub fn view<'a>(issues: &'a [Issue], query: &QueryState) -> Vec<&'a Issue> {
    let mut sorted: Vec<&Issue> = issues.iter().collect();

    if let Some(column) = query.sort_column {
        // `sort_by` is stable, so ties keep server order in both directions.
        sorted.sort_by(|a, b| {
            let ordering = compare_text(column.key(a), column.key(b));
            match query.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let needle = query.search_text.to_lowercase();
    sorted
        .into_iter()
        .filter(|issue| query.matches_search(issue, &needle))
        .filter(|issue| query.matches_status(issue))
        .collect()
}

/// Summary counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueStats {
    pub total: usize,
    pub resolved: usize,
    pub in_progress: usize,
    /// Pending or Reported
    pub pending: usize,
}

impl IssueStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut stats, issue| {
            stats.total += 1;
            match issue.status {
                Status::Resolved => stats.resolved += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Pending | Status::Reported => stats.pending += 1,
                Status::Rejected => {}
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Location;
    use pretty_assertions::assert_eq;

    fn issue(id: &str, title: &str, description: &str, address: &str, status: Status) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            issue_type: "Road Infrastructure".to_string(),
            location: Location {
                latitude: 0.0,
                longitude: 0.0,
                address: address.to_string(),
            },
            reported_by: "citizen".to_string(),
            reported_at: None,
            image: None,
            status,
        }
    }

    fn ids(view: &[&Issue]) -> Vec<String> {
        view.iter().map(|i| i.id.clone()).collect()
    }

    fn sample() -> Vec<Issue> {
        vec![
            issue("1", "Streetlight out", "Dark corner", "Pune", Status::Pending),
            issue("2", "Broken road", "Pothole on Main St", "Nagpur", Status::Resolved),
            issue("3", "Garbage pile", "Not collected", "Amravati", Status::InProgress),
            issue("4", "Water leak", "Pipe burst", "Nagpur East", Status::Rejected),
        ]
    }

    #[test]
    fn test_no_query_preserves_server_order() {
        let issues = sample();
        assert_eq!(ids(&view(&issues, &QueryState::default())), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let issues = vec![
            issue("b", "B", "", "", Status::Pending),
            issue("a1", "A", "", "", Status::Pending),
            issue("a2", "A", "", "", Status::Pending),
        ];
        let mut query = QueryState::default();
        query.toggle_sort(SortColumn::Title);
        assert_eq!(ids(&view(&issues, &query)), ["a1", "a2", "b"]);

        query.toggle_sort(SortColumn::Title);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(ids(&view(&issues, &query)), ["b", "a1", "a2"]);
    }

    #[test]
    fn test_sort_ignores_case() {
        let issues = vec![
            issue("B", "Banana", "", "", Status::Pending),
            issue("a", "apple", "", "", Status::Pending),
            issue("C", "cherry", "", "", Status::Pending),
            issue("A", "Apple", "", "", Status::Pending),
        ];
        let mut query = QueryState::default();
        query.toggle_sort(SortColumn::Title);
        assert_eq!(ids(&view(&issues, &query)), ["a", "A", "B", "C"]);

        query.toggle_sort(SortColumn::Title);
        assert_eq!(ids(&view(&issues, &query)), ["C", "B", "A", "a"]);
    }

    #[test]
    fn test_sort_by_location_and_status() {
        let issues = sample();
        let mut query = QueryState::default();
        query.toggle_sort(SortColumn::Location);
        assert_eq!(ids(&view(&issues, &query)), ["3", "2", "4", "1"]);

        query.toggle_sort(SortColumn::Status);
        assert_eq!(query.sort_direction, SortDirection::Asc);
        // "In Progress" < "Pending" < "Rejected" < "Resolved"
        assert_eq!(ids(&view(&issues, &query)), ["3", "1", "4", "2"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let issues = sample();
        let mut query = QueryState::default();

        query.search_text = "pothole".to_string();
        assert_eq!(ids(&view(&issues, &query)), ["2"]);

        query.search_text = "STREETLIGHT".to_string();
        assert_eq!(ids(&view(&issues, &query)), ["1"]);

        query.search_text = "nagpur".to_string();
        assert_eq!(ids(&view(&issues, &query)), ["2", "4"]);
    }

    #[test]
    fn test_address_scope_ignores_title_and_description() {
        let issues = sample();
        let mut query = QueryState::with_scope(SearchScope::Address);
        query.search_text = "pothole".to_string();
        assert!(view(&issues, &query).is_empty());

        query.search_text = "amra".to_string();
        assert_eq!(ids(&view(&issues, &query)), ["3"]);
    }

    #[test]
    fn test_empty_status_filter_passes_everything() {
        let issues = sample();
        let mut query = QueryState::default();
        query.search_text = "nagpur".to_string();
        assert_eq!(view(&issues, &query).len(), 2);

        query.toggle_status(Status::Resolved);
        assert_eq!(ids(&view(&issues, &query)), ["2"]);

        query.toggle_status(Status::Resolved);
        assert!(query.status_filters.is_empty());
        assert_eq!(view(&issues, &query).len(), 2);
    }

    #[test]
    fn test_multi_status_filter() {
        let issues = sample();
        let mut query = QueryState::default();
        query.toggle_status(Status::Pending);
        query.toggle_status(Status::Rejected);
        assert_eq!(ids(&view(&issues, &query)), ["1", "4"]);
    }

    #[test]
    fn test_view_is_repeatable() {
        let issues = sample();
        let mut query = QueryState::default();
        query.toggle_sort(SortColumn::Title);
        query.toggle_sort(SortColumn::Title);
        query.search_text = "o".to_string();
        assert_eq!(view(&issues, &query), view(&issues, &query));
    }

    #[test]
    fn test_clear_keeps_scope() {
        let mut query = QueryState::with_scope(SearchScope::Address);
        query.search_text = "x".to_string();
        query.toggle_sort(SortColumn::Title);
        query.toggle_status(Status::Pending);
        query.clear();
        assert_eq!(query, QueryState::with_scope(SearchScope::Address));
    }

    #[test]
    fn test_stats() {
        let mut issues = sample();
        issues.push(issue("5", "New", "", "", Status::Reported));
        assert_eq!(
            IssueStats::from_issues(&issues),
            IssueStats {
                total: 5,
                resolved: 1,
                in_progress: 1,
                pending: 2,
            }
        );
    }
}
