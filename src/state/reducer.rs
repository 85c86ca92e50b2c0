//! Screen state as a pure `(state, action) -> state` function
//!
//! A screen moves through `Idle → Loading → Loaded | Error`. Every fetch
//! carries a [`RequestId`]; only the response to the request currently in
//! flight is applied, so a slow stale response can never overwrite a newer
//! one or repopulate a discarded screen.

use crate::core::error::FetchError;
use crate::core::query::QueryState;
use crate::core::record::Record;
use crate::core::store::ListStore;
use crate::list::view::{ListEngine, ListPage};
use serde::Serialize;

/// Monotonically increasing identifier of one fetch
pub type RequestId = u64;

/// Lifecycle of a screen's List Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Why a fetch was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchReason {
    /// First load or a change of what the screen shows; resets the query
    Navigation,
    /// Reload after a successful mutation; keeps the query
    Refetch,
}

/// The fetch the screen is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub request: RequestId,
    pub reason: FetchReason,
}

/// Everything one list screen knows
#[derive(Debug, Clone)]
pub struct ListState<R> {
    pub status: LoadStatus,
    pub store: ListStore<R>,
    pub query: QueryState,
    pub in_flight: Option<InFlight>,
    pub last_error: Option<FetchError>,
    defaults: QueryState,
}

/// Events that move a screen from one state to the next
#[derive(Debug, Clone)]
pub enum Action<R> {
    FetchStarted {
        request: RequestId,
        reason: FetchReason,
    },
    FetchSucceeded {
        request: RequestId,
        records: Vec<R>,
    },
    FetchFailed {
        request: RequestId,
        error: FetchError,
    },
    SearchChanged(String),
    SortToggled(String),
    PageChanged(usize),
    /// The screen now shows something else; the old store is stale
    Navigated,
    /// The screen went away; late responses must be ignored
    Discarded,
}

impl<R: Record> ListState<R> {
    /// Fresh idle state with `defaults` as the query
    pub fn new(defaults: QueryState) -> Self {
        Self {
            status: LoadStatus::Idle,
            store: ListStore::new(),
            query: defaults.clone(),
            in_flight: None,
            last_error: None,
            defaults,
        }
    }

    /// Initial query state restored on navigation
    pub fn defaults(&self) -> &QueryState {
        &self.defaults
    }

    /// Apply `action` in place
    pub fn dispatch(&mut self, action: Action<R>) {
        let placeholder = ListState::new(self.defaults.clone());
        let current = std::mem::replace(self, placeholder);
        *self = reduce(current, action);
    }

    /// Current page of the Result View
    pub fn page(&self, engine: &ListEngine<R>) -> ListPage<R> {
        engine.query(&self.store, &self.query)
    }

    /// Loaded but nothing to show
    pub fn is_no_data(&self) -> bool {
        self.status == LoadStatus::Loaded && self.store.is_empty()
    }

    fn accepts(&self, request: RequestId) -> Option<InFlight> {
        self.in_flight.filter(|in_flight| in_flight.request == request)
    }
}

/// Compute the next state
pub fn reduce<R: Record>(mut state: ListState<R>, action: Action<R>) -> ListState<R> {
    match action {
        Action::FetchStarted { request, reason } => {
            state.status = LoadStatus::Loading;
            state.in_flight = Some(InFlight { request, reason });
            state.last_error = None;
        }
        Action::FetchSucceeded { request, records } => {
            let Some(in_flight) = state.accepts(request) else {
                tracing::debug!(request, "dropping stale fetch response");
                return state;
            };
            state.store.replace(records);
            state.status = LoadStatus::Loaded;
            state.in_flight = None;
            if in_flight.reason == FetchReason::Navigation {
                state.query = state.defaults.clone();
            }
        }
        Action::FetchFailed { request, error } => {
            if state.accepts(request).is_none() {
                tracing::debug!(request, %error, "dropping stale fetch failure");
                return state;
            }
            state.status = LoadStatus::Error;
            state.in_flight = None;
            state.last_error = Some(error);
        }
        Action::SearchChanged(term) => state.query.set_search(term),
        Action::SortToggled(field) => state.query.toggle_sort(&field),
        Action::PageChanged(page) => state.query.page = page.max(1),
        Action::Navigated => {
            state.store.clear();
            state.query = state.defaults.clone();
            state.status = LoadStatus::Idle;
            state.in_flight = None;
            state.last_error = None;
        }
        Action::Discarded => {
            state = ListState::new(state.defaults);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::SortDirection;
    use crate::list::testing::Row;

    fn state() -> ListState<Row> {
        ListState::new(QueryState::new("id"))
    }

    fn started(request: RequestId, reason: FetchReason) -> Action<Row> {
        Action::FetchStarted { request, reason }
    }

    #[test]
    fn test_idle_loading_loaded() {
        let mut state = state();
        assert_eq!(state.status, LoadStatus::Idle);

        state.dispatch(started(1, FetchReason::Navigation));
        assert_eq!(state.status, LoadStatus::Loading);

        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["a", "b"]),
        });
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.store.len(), 2);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn test_failure_keeps_previous_store() {
        let mut state = state();
        state.dispatch(started(1, FetchReason::Navigation));
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["a"]),
        });

        state.dispatch(started(2, FetchReason::Refetch));
        state.dispatch(Action::FetchFailed {
            request: 2,
            error: FetchError::Network {
                reason: "refused".to_string(),
            },
        });

        assert_eq!(state.status, LoadStatus::Error);
        assert_eq!(state.store.len(), 1);
        assert_eq!(
            state.last_error.as_ref().map(ToString::to_string).as_deref(),
            Some("Cannot connect to server")
        );
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = state();
        state.dispatch(started(1, FetchReason::Navigation));
        state.dispatch(started(2, FetchReason::Navigation));

        state.dispatch(Action::FetchSucceeded {
            request: 2,
            records: Row::many(&["new"]),
        });
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["old", "older"]),
        });

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.records()[0].code.as_deref(), Some("new"));
    }

    #[test]
    fn test_discarded_screen_ignores_late_response() {
        let mut state = state();
        state.dispatch(started(1, FetchReason::Navigation));
        state.dispatch(Action::Discarded);
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["late"]),
        });

        assert_eq!(state.status, LoadStatus::Idle);
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_refetch_keeps_query_navigation_resets_it() {
        let mut state = state();
        state.dispatch(Action::SearchChanged("abc".to_string()));
        state.dispatch(Action::SortToggled("code".to_string()));

        state.dispatch(started(1, FetchReason::Refetch));
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["abc"]),
        });
        assert_eq!(state.query.search_term, "abc");
        assert_eq!(state.query.sort_field, "code");

        state.dispatch(started(2, FetchReason::Navigation));
        state.dispatch(Action::FetchSucceeded {
            request: 2,
            records: Row::many(&["abc"]),
        });
        assert_eq!(state.query, QueryState::new("id"));
    }

    #[test]
    fn test_query_changes_reset_page() {
        let mut state = state();
        state.dispatch(Action::PageChanged(3));
        assert_eq!(state.query.page, 3);

        state.dispatch(Action::SearchChanged("x".to_string()));
        assert_eq!(state.query.page, 1);

        state.dispatch(Action::PageChanged(2));
        state.dispatch(Action::SortToggled("id".to_string()));
        assert_eq!(state.query.page, 1);
        assert_eq!(state.query.sort_direction, SortDirection::Asc);

        state.dispatch(Action::PageChanged(0));
        assert_eq!(state.query.page, 1);
    }

    #[test]
    fn test_navigated_clears_store() {
        let mut state = state();
        state.dispatch(started(1, FetchReason::Navigation));
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Row::many(&["a"]),
        });
        state.dispatch(Action::PageChanged(2));
        state.dispatch(Action::Navigated);

        assert_eq!(state.status, LoadStatus::Idle);
        assert!(state.store.is_empty());
        assert_eq!(state.query.page, 1);
    }

    #[test]
    fn test_loaded_empty_is_no_data() {
        let mut state = state();
        state.dispatch(started(1, FetchReason::Navigation));
        state.dispatch(Action::FetchSucceeded {
            request: 1,
            records: Vec::new(),
        });
        assert!(state.is_no_data());
    }
}
