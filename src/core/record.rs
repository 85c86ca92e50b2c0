//! Record trait defining what a list screen can filter, sort and page over

use crate::core::field::FieldValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every item held in a list screen.
///
/// A record has a stable unique identifier and exposes its fields by name
/// so the generic list engine can search and sort without knowing the
/// concrete type.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Name of the identifier field (e.g. "booking_id")
    fn id_field() -> &'static str;

    /// Get the unique identifier of this record
    fn record_id(&self) -> i64;

    /// Get the value of a specific field by name
    ///
    /// Unknown fields return `None`, which the engine treats as null.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Fields a sort request may name
    fn sortable_fields() -> &'static [&'static str];

    /// Check whether `field` can be sorted on
    fn is_sortable(field: &str) -> bool {
        Self::sortable_fields().contains(&field)
    }
}
