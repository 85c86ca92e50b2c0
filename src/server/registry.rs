//! Screen registry for managing list screens and mounting their routes

use axum::{
    Router,
    routing::{delete, get, post},
};
use indexmap::IndexMap;
use std::sync::Arc;

use crate::core::record::Record;
use crate::screens::{ScreenFilter, ScreenInfo, ScreenService};
use crate::server::handlers::{delete_record, list_records, refresh_records};

/// Trait that describes how to mount one list screen
pub trait ScreenDescriptor: Send + Sync {
    /// The screen name, also its URL segment (e.g. "bookings")
    fn name(&self) -> &str;

    /// Public description for `/api/screens`
    fn info(&self) -> ScreenInfo;

    /// Build the routes of this screen
    ///
    /// - GET /api/{name}
    /// - POST /api/{name}/refresh
    /// - DELETE /api/{name}/{id}
    fn build_routes(self: Arc<Self>) -> Router;
}

impl<R: Record, F: ScreenFilter<R>> ScreenDescriptor for ScreenService<R, F> {
    fn name(&self) -> &str {
        ScreenService::name(self)
    }

    fn info(&self) -> ScreenInfo {
        ScreenService::info(self)
    }

    fn build_routes(self: Arc<Self>) -> Router {
        let base = format!("/api/{}", ScreenService::name(&self));
        Router::new()
            .route(&base, get(list_records::<R, F>))
            .route(&format!("{}/refresh", base), post(refresh_records::<R, F>))
            .route(&format!("{}/{{id}}", base), delete(delete_record::<R, F>))
            .with_state(self)
    }
}

/// Registry of every screen the gateway serves
///
/// Registration order is kept for `/api/screens`.
#[derive(Default, Clone)]
pub struct ScreenRegistry {
    screens: IndexMap<String, Arc<dyn ScreenDescriptor>>,
}

impl ScreenRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            screens: IndexMap::new(),
        }
    }

    /// Register a screen; a screen with the same name is replaced
    pub fn register(&mut self, screen: Arc<dyn ScreenDescriptor>) {
        let name = screen.name().to_string();
        self.screens.insert(name, screen);
    }

    /// Look up a screen by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScreenDescriptor>> {
        self.screens.get(name)
    }

    /// Build a router with all registered screen routes
    pub fn build_routes(&self) -> Router {
        let mut router = Router::new();

        for screen in self.screens.values() {
            router = router.merge(screen.clone().build_routes());
        }

        router
    }

    /// Descriptions of all screens, in registration order
    pub fn infos(&self) -> Vec<ScreenInfo> {
        self.screens.values().map(|screen| screen.info()).collect()
    }

    /// Get all registered screen names
    pub fn names(&self) -> Vec<&str> {
        self.screens.keys().map(|s| s.as_str()).collect()
    }
}
