//! Backend access for list screens

pub mod api;
pub mod fetcher;
pub mod source;

pub use api::ApiClient;
pub use fetcher::ListFetcher;
pub use source::{InMemorySource, RecordSource, RestSource};
