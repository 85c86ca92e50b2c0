//! Client-side list processing: search filter, sort, pagination

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use filter::filter_records;
pub use paginate::{page_slice, page_window, total_pages};
pub use sort::{compare_values, sort_records};
pub use view::{ListEngine, ListPage, ListSpec};
