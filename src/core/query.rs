//! Query state, query-string parameters and pagination metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction for a list column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Current search/sort/page selection of one list screen
///
/// Owned by whoever drives the screen; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// 1-based page number
    pub page: usize,
}

impl QueryState {
    /// Defaults for a screen: empty search, page 1, descending on `sort_field`
    pub fn new(sort_field: impl Into<String>) -> Self {
        Self {
            search_term: String::new(),
            sort_field: sort_field.into(),
            sort_direction: SortDirection::Desc,
            page: 1,
        }
    }

    /// Builder-style direction override
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Whether the search term filters anything at all
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Apply a click on a column header
    ///
    /// Same column flips the direction, a new column starts ascending.
    /// Either way the page goes back to 1.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Replace the search term, resetting to page 1
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }
}

/// Query parameters for a list request
///
/// # Example
/// ```text
/// GET /api/bookings?search=abc&sort=final_price:asc&page=2
/// GET /api/coupons?sort=code&toggle=code
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Case-insensitive substring searched in the screen's text fields
    pub search: Option<String>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Column header clicked, applied on top of `sort`
    pub toggle: Option<String>,
}

impl QueryParams {
    /// Parse the `sort` expression into field and direction
    pub fn sort_spec(&self) -> Result<Option<(String, SortDirection)>, String> {
        let Some(sort) = self.sort.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if sort.is_empty() {
            return Ok(None);
        }

        match sort.split_once(':') {
            Some((field, direction)) if !field.is_empty() => {
                Ok(Some((field.to_string(), direction.parse()?)))
            }
            Some(_) => Err(format!("invalid sort expression '{}'", sort)),
            None => Ok(Some((sort.to_string(), SortDirection::Asc))),
        }
    }

    /// Resolve into a query state on top of the screen defaults
    pub fn into_query_state(self, defaults: QueryState) -> Result<QueryState, String> {
        let mut state = defaults;

        if let Some((field, direction)) = self.sort_spec()? {
            state.sort_field = field;
            state.sort_direction = direction;
        }
        if let Some(search) = self.search {
            state.search_term = search;
        }
        if let Some(page) = self.page {
            state.page = page.max(1);
        }
        if let Some(field) = self.toggle.as_deref().filter(|f| !f.is_empty()) {
            state.toggle_sort(field);
        }

        Ok(state)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, 0 when there are no items
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_state_defaults() {
        let state = QueryState::new("created_at");
        assert_eq!(state.search_term, "");
        assert_eq!(state.sort_direction, SortDirection::Desc);
        assert_eq!(state.page(), 1);
        assert!(!state.has_search());
    }

    #[test]
    fn test_toggle_same_field_twice_restores_direction() {
        let mut state = QueryState::new("created_at");
        state.toggle_sort("created_at");
        assert_eq!(state.sort_direction, SortDirection::Asc);
        state.toggle_sort("created_at");
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_toggle_new_field_is_ascending_and_resets_page() {
        let mut state = QueryState::new("created_at").with_direction(SortDirection::Asc);
        state.page = 4;
        state.toggle_sort("final_price");
        assert_eq!(state.sort_field, "final_price");
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_whitespace_search_is_not_a_search() {
        let mut state = QueryState::new("created_at");
        state.set_search("   ");
        assert!(!state.has_search());
    }

    #[test]
    fn test_sort_spec_parsing() {
        let params = QueryParams {
            sort: Some("final_price:desc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.sort_spec().unwrap(),
            Some(("final_price".to_string(), SortDirection::Desc))
        );

        let params = QueryParams {
            sort: Some("code".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.sort_spec().unwrap(),
            Some(("code".to_string(), SortDirection::Asc))
        );

        let params = QueryParams {
            sort: Some("code:sideways".to_string()),
            ..Default::default()
        };
        assert!(params.sort_spec().is_err());
    }

    #[test]
    fn test_into_query_state_applies_toggle_last() {
        let params = QueryParams {
            sort: Some("code:asc".to_string()),
            page: Some(3),
            toggle: Some("code".to_string()),
            ..Default::default()
        };
        let state = params.into_query_state(QueryState::new("created_at")).unwrap();
        assert_eq!(state.sort_field, "code");
        assert_eq!(state.sort_direction, SortDirection::Desc);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_meta_huge_page() {
        let meta = PaginationMeta::new(usize::MAX, 7, 12);
        assert_eq!(meta.page, usize::MAX);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(2, 7, 12);
        assert!(!last.has_next);
        assert!(PaginationMeta::new(1, 7, 12).has_next);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(1, 7, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }
}
