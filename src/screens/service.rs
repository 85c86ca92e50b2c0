//! One list screen: engine + fetcher + request handling

use crate::client::fetcher::ListFetcher;
use crate::client::source::RecordSource;
use crate::core::error::{FetchError, QueryError, TourdeskError};
use crate::core::query::{PaginationMeta, QueryParams, QueryState};
use crate::core::record::Record;
use crate::list::view::{ListEngine, ListSpec};
use crate::screens::{NoFilter, ScreenFilter};
use crate::state::{FetchReason, LoadStatus};
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Body of a list request
#[derive(Debug, Serialize)]
pub struct ListResponse<R> {
    /// Records of the requested page
    pub data: Vec<R>,

    /// Pagination metadata over the filtered view
    pub pagination: PaginationMeta,

    /// Page numbers to render as buttons
    pub window: Vec<usize>,

    /// Effective query after defaults and toggles
    pub query: QueryState,

    /// Load status of the screen's store
    pub status: LoadStatus,

    /// Message of the last failed fetch, while in the error state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Description of a registered screen
#[derive(Debug, Clone, Serialize)]
pub struct ScreenInfo {
    pub name: String,
    pub id_field: String,
    pub page_size: usize,
    pub search_fields: Vec<String>,
    pub sortable_fields: Vec<String>,
    pub default_sort: String,
}

/// Runs one list screen
pub struct ScreenService<R: Record, F = NoFilter> {
    engine: ListEngine<R>,
    fetcher: ListFetcher<R>,
    load_gate: Mutex<()>,
    _filter: PhantomData<fn() -> F>,
}

impl<R: Record, F: ScreenFilter<R>> ScreenService<R, F> {
    pub fn new(spec: ListSpec, source: Arc<dyn RecordSource<R>>) -> Self {
        let fetcher = ListFetcher::new(spec.name.clone(), source, spec.defaults());
        Self {
            engine: ListEngine::new(spec),
            fetcher,
            load_gate: Mutex::new(()),
            _filter: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.engine.spec().name
    }

    pub fn engine(&self) -> &ListEngine<R> {
        &self.engine
    }

    pub fn fetcher(&self) -> &ListFetcher<R> {
        &self.fetcher
    }

    pub fn info(&self) -> ScreenInfo {
        let spec = self.engine.spec();
        ScreenInfo {
            name: spec.name.clone(),
            id_field: R::id_field().to_string(),
            page_size: spec.page_size,
            search_fields: spec.search_fields.clone(),
            sortable_fields: R::sortable_fields().iter().map(|f| f.to_string()).collect(),
            default_sort: format!("{}:{}", spec.default_sort_field, spec.default_direction),
        }
    }

    /// Resolve request parameters into a query state
    pub fn resolve_query(&self, params: QueryParams) -> Result<QueryState, QueryError> {
        let query = params
            .into_query_state(self.engine.defaults())
            .map_err(QueryError::InvalidSort)?;

        if !R::is_sortable(&query.sort_field) {
            return Err(QueryError::UnknownSortField {
                field: query.sort_field,
                allowed: R::sortable_fields().iter().map(|f| f.to_string()).collect(),
            });
        }
        Ok(query)
    }

    /// Load the store on first use
    ///
    /// Concurrent first requests wait for one load instead of racing.
    /// A failed load is not retried here; it stays visible in the state
    /// until [`refresh`](Self::refresh).
    pub async fn ensure_loaded(&self) {
        let _gate = self.load_gate.lock().await;
        if let Err(error) = self.fetcher.ensure_loaded().await {
            tracing::warn!(screen = %self.name(), %error, "initial load failed");
        }
    }

    /// Answer a list request from the current store
    pub async fn list(&self, params: QueryParams, filter: F) -> Result<ListResponse<R>, TourdeskError> {
        filter.check()?;
        let query = self.resolve_query(params)?;
        self.ensure_loaded().await;

        let response = self.fetcher.with_state(|state| {
            let page = self
                .engine
                .query_where(&state.store, &query, |record| filter.accepts(record));
            ListResponse {
                data: page.items,
                pagination: page.pagination,
                window: page.window,
                query: query.clone(),
                status: state.status,
                error: state.last_error.as_ref().map(ToString::to_string),
            }
        });

        tracing::debug!(
            screen = %self.name(),
            total = response.pagination.total,
            page = response.pagination.page,
            "list served"
        );
        Ok(response)
    }

    /// Refetch the store, keeping nothing but the records
    pub async fn refresh(&self) -> Result<usize, FetchError> {
        let _gate = self.load_gate.lock().await;
        self.fetcher.fetch(FetchReason::Refetch).await
    }

    /// Delete a record at the backend and refetch on success
    pub async fn delete(&self, id: i64) -> Result<(), FetchError> {
        let _gate = self.load_gate.lock().await;
        self.fetcher.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::source::InMemorySource;
    use crate::screens::coupons::{self, Coupon};
    use crate::screens::tours::{self, Tour, TourFilter};

    fn coupon(id: i64, code: &str) -> Coupon {
        Coupon {
            coupon_id: id,
            code: Some(code.to_string()),
            description: None,
            discount_type: Some("fixed".to_string()),
            discount_value: Some(id as f64 * 10.0),
            usage_limit: None,
            used_count: None,
            valid_from: None,
            valid_to: None,
            is_active: Some(true),
            created_at: None,
        }
    }

    fn coupons_screen(records: Vec<Coupon>) -> ScreenService<Coupon> {
        ScreenService::new(coupons::spec(), Arc::new(InMemorySource::new(records)))
    }

    #[tokio::test]
    async fn test_list_loads_lazily() {
        let screen = coupons_screen(vec![coupon(1, "A"), coupon(2, "B")]);
        assert_eq!(screen.fetcher().with_state(|s| s.status), LoadStatus::Idle);

        let response = screen.list(QueryParams::default(), NoFilter {}).await.unwrap();
        assert_eq!(response.status, LoadStatus::Loaded);
        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.query.sort_field, "created_at");
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let screen = coupons_screen(vec![]);
        let params = QueryParams {
            sort: Some("secret:asc".to_string()),
            ..Default::default()
        };
        let err = screen.list(params, NoFilter {}).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let screen = coupons_screen(vec![coupon(1, "A"), coupon(2, "B")]);
        screen.ensure_loaded().await;
        screen.delete(1).await.unwrap();

        let response = screen.list(QueryParams::default(), NoFilter {}).await.unwrap();
        assert_eq!(response.pagination.total, 1);
        assert_eq!(response.data[0].coupon_id, 2);
    }

    #[tokio::test]
    async fn test_tour_filter_applies() {
        let tours = vec![
            Tour {
                tour_id: 1,
                title: Some("Bay cruise".to_string()),
                destination: Some("Ha Long".to_string()),
                price: Some(200.0),
                duration_days: Some(2),
                departure_date: None,
                average_rating: None,
                created_at: None,
            },
            Tour {
                tour_id: 2,
                title: Some("Old town walk".to_string()),
                destination: Some("Hoi An".to_string()),
                price: Some(50.0),
                duration_days: Some(1),
                departure_date: None,
                average_rating: None,
                created_at: None,
            },
        ];
        let screen: ScreenService<Tour, TourFilter> =
            ScreenService::new(tours::spec(), Arc::new(InMemorySource::new(tours)));

        let filter = TourFilter {
            max_price: Some(100.0),
            ..Default::default()
        };
        let response = screen.list(QueryParams::default(), filter).await.unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].tour_id, 2);
    }
}
