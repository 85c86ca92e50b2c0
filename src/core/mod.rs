//! Core module containing fundamental traits and types for list screens

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod store;

pub use error::{ConfigError, FetchError, QueryError, ScreenError, TourdeskError};
pub use field::FieldValue;
pub use query::{PaginationMeta, QueryParams, QueryState, SortDirection};
pub use record::Record;
pub use store::ListStore;
