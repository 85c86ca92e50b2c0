//! Sequenced, abortable fetches feeding a screen's state
//!
//! Each fetch gets the next [`RequestId`]. Starting a fetch aborts the one
//! still in flight, and the reducer ignores any response that does not
//! belong to the latest request.

use crate::client::source::RecordSource;
use crate::core::error::FetchError;
use crate::core::query::QueryState;
use crate::core::record::Record;
use crate::state::{Action, FetchReason, ListState, LoadStatus, RequestId};
use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Owns one screen's state and the source it loads from
pub struct ListFetcher<R: Record> {
    name: String,
    source: RwLock<Arc<dyn RecordSource<R>>>,
    state: RwLock<ListState<R>>,
    next_request: AtomicU64,
    current: Mutex<Option<AbortHandle>>,
}

impl<R: Record> ListFetcher<R> {
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn RecordSource<R>>,
        defaults: QueryState,
    ) -> Self {
        Self {
            name: name.into(),
            source: RwLock::new(source),
            state: RwLock::new(ListState::new(defaults)),
            next_request: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply an action to the held state
    pub fn dispatch(&self, action: Action<R>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .dispatch(action);
    }

    /// Read the state without cloning it
    pub fn with_state<T>(&self, f: impl FnOnce(&ListState<R>) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> ListState<R> {
        self.with_state(Clone::clone)
    }

    /// Load the List Store from the source
    ///
    /// Returns the number of records loaded. A fetch superseded by a newer
    /// one resolves to [`FetchError::Aborted`] and leaves the state alone.
    pub async fn fetch(&self, reason: FetchReason) -> Result<usize, FetchError> {
        let request = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle)
        {
            previous.abort();
        }

        let source = self.source();
        tracing::debug!(screen = %self.name, request, ?reason, source = %source.describe(), "fetch started");
        self.dispatch(Action::FetchStarted { request, reason });

        match Abortable::new(source.load(), registration).await {
            Ok(Ok(records)) => {
                let count = records.len();
                self.dispatch(Action::FetchSucceeded { request, records });
                self.finish(request);
                tracing::info!(screen = %self.name, request, count, "list loaded");
                Ok(count)
            }
            Ok(Err(error)) => {
                self.dispatch(Action::FetchFailed {
                    request,
                    error: error.clone(),
                });
                self.finish(request);
                tracing::warn!(screen = %self.name, request, %error, "list fetch failed");
                Err(error)
            }
            Err(_) => {
                tracing::debug!(screen = %self.name, request, "fetch superseded");
                Err(FetchError::Aborted)
            }
        }
    }

    /// Load only when nothing has been loaded or attempted yet
    pub async fn ensure_loaded(&self) -> Result<(), FetchError> {
        let idle = self.with_state(|state| state.status == LoadStatus::Idle);
        if idle {
            self.fetch(FetchReason::Navigation).await?;
        }
        Ok(())
    }

    /// Run a mutation and refetch once it succeeds
    ///
    /// A failed mutation leaves the store untouched. A failed refetch is
    /// recorded in the state but does not undo the mutation's result.
    pub async fn mutate_then_refetch<T, Fut>(&self, mutation: Fut) -> Result<T, FetchError>
    where
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let output = mutation.await?;
        if let Err(error) = self.fetch(FetchReason::Refetch).await {
            tracing::warn!(screen = %self.name, %error, "refetch after mutation failed");
        }
        Ok(output)
    }

    /// Delete a record through the source, then refetch
    pub async fn delete(&self, id: i64) -> Result<(), FetchError> {
        let source = self.source();
        self.mutate_then_refetch(async move { source.delete(id).await })
            .await
    }

    /// Point the screen at another source and load it
    pub async fn navigate(&self, source: Arc<dyn RecordSource<R>>) -> Result<usize, FetchError> {
        *self.source.write().unwrap_or_else(PoisonError::into_inner) = source;
        self.abort_in_flight();
        self.dispatch(Action::Navigated);
        self.fetch(FetchReason::Navigation).await
    }

    /// Drop the state; responses still in flight are ignored
    pub fn discard(&self) {
        self.abort_in_flight();
        self.dispatch(Action::Discarded);
    }

    /// Identifier the next fetch will use
    pub fn next_request_id(&self) -> RequestId {
        self.next_request.load(Ordering::SeqCst) + 1
    }

    fn source(&self) -> Arc<dyn RecordSource<R>> {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn abort_in_flight(&self) {
        if let Some(handle) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    fn finish(&self, request: RequestId) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if self.next_request.load(Ordering::SeqCst) == request {
            current.take();
        }
    }
}
