//! Generic list engine: filter → sort → paginate for any record type
//!
//! One [`ListEngine`] is built per screen from a [`ListSpec`] carrying the
//! screen's search fields, page size and default sort. The Result View is a
//! pure function of the store and the query state; nothing is cached.
//!
//! ```rust,ignore
//! let engine = ListEngine::<Booking>::new(bookings::spec());
//! let page = engine.query(&store, &engine.defaults());
//! assert!(page.pagination.total_pages <= 1 || page.items.len() == 7);
//! ```

use crate::core::query::{PaginationMeta, QueryState, SortDirection};
use crate::core::record::Record;
use crate::core::store::ListStore;
use crate::list::filter::filter_records;
use crate::list::paginate::{page_slice, page_window};
use crate::list::sort::sort_records;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Default number of page buttons
pub const DEFAULT_WINDOW: usize = 5;

/// Per-screen parameters of the list pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpec {
    /// Screen name (e.g. "bookings")
    pub name: String,

    /// Fields searched by the text filter
    pub search_fields: Vec<String>,

    /// Records per page, at least 1
    pub page_size: usize,

    /// Sort field used before the user clicks any header
    pub default_sort_field: String,

    /// Direction used with `default_sort_field`
    #[serde(default)]
    pub default_direction: SortDirection,

    /// Maximum number of page buttons
    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

impl ListSpec {
    pub fn new(name: &str, search_fields: &[&str], page_size: usize, default_sort: &str) -> Self {
        Self {
            name: name.to_string(),
            search_fields: search_fields.iter().map(|f| f.to_string()).collect(),
            page_size: page_size.max(1),
            default_sort_field: default_sort.to_string(),
            default_direction: SortDirection::Desc,
            window: DEFAULT_WINDOW,
        }
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Initial query state for this screen
    pub fn defaults(&self) -> QueryState {
        QueryState::new(&self.default_sort_field).with_direction(self.default_direction)
    }
}

/// One page of a Result View plus what the pager needs to draw itself
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<R> {
    /// Records of the current page
    pub items: Vec<R>,

    /// Pagination metadata over the whole Result View
    pub pagination: PaginationMeta,

    /// Page numbers to render as buttons
    pub window: Vec<usize>,
}

impl<R> ListPage<R> {
    /// True when the Result View holds no records ("no data", not an error)
    pub fn is_empty(&self) -> bool {
        self.pagination.total == 0
    }
}

/// Filter/sort/paginate pipeline for one record type
#[derive(Debug, Clone)]
pub struct ListEngine<R> {
    spec: ListSpec,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> ListEngine<R> {
    pub fn new(spec: ListSpec) -> Self {
        Self {
            spec,
            _record: PhantomData,
        }
    }

    pub fn spec(&self) -> &ListSpec {
        &self.spec
    }

    /// Initial query state for this screen
    pub fn defaults(&self) -> QueryState {
        self.spec.defaults()
    }

    /// The filtered and sorted Result View, borrowing from the store
    pub fn view<'a>(&self, store: &'a ListStore<R>, query: &QueryState) -> Vec<&'a R> {
        self.view_where(store, query, |_| true)
    }

    /// Result View restricted to records accepted by `predicate`
    pub fn view_where<'a, F>(
        &self,
        store: &'a ListStore<R>,
        query: &QueryState,
        predicate: F,
    ) -> Vec<&'a R>
    where
        F: Fn(&R) -> bool,
    {
        let candidates = store.records().iter().filter(|&record| predicate(record));
        let mut view = filter_records(candidates, &query.search_term, &self.spec.search_fields);
        sort_records(&mut view, &query.sort_field, query.sort_direction);
        view
    }

    /// Run the full pipeline and cut out the requested page
    pub fn query(&self, store: &ListStore<R>, query: &QueryState) -> ListPage<R> {
        self.query_where(store, query, |_| true)
    }

    /// Run the full pipeline with an extra record predicate
    pub fn query_where<F>(&self, store: &ListStore<R>, query: &QueryState, predicate: F) -> ListPage<R>
    where
        F: Fn(&R) -> bool,
    {
        let view = self.view_where(store, query, predicate);
        let page = query.page();
        let pagination = PaginationMeta::new(page, self.spec.page_size, view.len());
        let window = page_window(page, pagination.total_pages, self.spec.window);
        let items = page_slice(&view, page, self.spec.page_size)
            .iter()
            .map(|record| (*record).clone())
            .collect();

        ListPage {
            items,
            pagination,
            window,
        }
    }
}
