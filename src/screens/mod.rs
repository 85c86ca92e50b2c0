//! Concrete list screens and the service that runs them

pub mod bookings;
pub mod coupons;
pub mod de;
pub mod reviews;
pub mod service;
pub mod tours;

use crate::core::error::QueryError;
use crate::core::record::Record;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use bookings::Booking;
pub use coupons::Coupon;
pub use reviews::Review;
pub use service::{ListResponse, ScreenInfo, ScreenService};
pub use tours::{Tour, TourFilter};

/// Screen-specific record filter read from the query string
///
/// Applied before the text search, so it narrows the Result View the same
/// way for every sort and page.
pub trait ScreenFilter<R: Record>: DeserializeOwned + Default + Send + Sync + 'static {
    /// Reject contradictory parameters before any record is looked at
    fn check(&self) -> Result<(), QueryError> {
        Ok(())
    }

    /// Whether `record` stays in the view
    fn accepts(&self, record: &R) -> bool;
}

/// Filter for screens without extra parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoFilter {}

impl<R: Record> ScreenFilter<R> for NoFilter {
    fn accepts(&self, _record: &R) -> bool {
        true
    }
}
