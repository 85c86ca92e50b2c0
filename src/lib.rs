//! # Tourdesk
//!
//! Client-side list engine for the tour booking account and admin screens.
//!
//! ## Features
//!
//! - **Filter, Sort, Paginate**: one pure pipeline over an in-memory List Store
//! - **Nulls Last**: records without a value sink to the end in both directions
//! - **Sort Toggle**: same field flips direction, a new field starts ascending
//! - **Fenced Fetches**: only the latest request may update a screen
//! - **Pure Reducer**: `(state, action) -> state` drives every transition
//! - **Gateway**: serves each screen's Result View as JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tourdesk::prelude::*;
//!
//! let engine = ListEngine::new(bookings::spec());
//! let store = ListStore::from_records(bookings_from_backend);
//! let mut query = engine.defaults();
//! query.toggle_sort("final_price");
//! let page = engine.query(&store, &query);
//!
//! println!("{} of {} pages", page.pagination.page, page.pagination.total_pages);
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod list;
pub mod screens;
pub mod server;
pub mod state;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConfigError, FetchError, QueryError, ScreenError, TourdeskError},
        field::FieldValue,
        query::{PaginationMeta, QueryParams, QueryState, SortDirection},
        record::Record,
        store::ListStore,
    };

    // === List Engine ===
    pub use crate::list::{ListEngine, ListPage, ListSpec};

    // === State ===
    pub use crate::state::{Action, FetchReason, ListState, LoadStatus, RequestId, reduce};

    // === Client ===
    pub use crate::client::{ApiClient, InMemorySource, ListFetcher, RecordSource, RestSource};

    // === Screens ===
    pub use crate::screens::{
        Booking, Coupon, ListResponse, NoFilter, Review, ScreenFilter, ScreenInfo, ScreenService,
        Tour, TourFilter, bookings, coupons, reviews, tours,
    };

    // === Config ===
    pub use crate::config::{ApiConfig, AppConfig, ScreenConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{ScreenDescriptor, ScreenRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
