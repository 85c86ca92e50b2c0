//! Public tour listing with destination, budget and date filters

use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::list::view::ListSpec;
use crate::screens::{ScreenFilter, de};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "tours";
pub const DEFAULT_PATH: &str = "/tours";
pub const PAGE_SIZE: usize = 9;

/// A bookable tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub tour_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub duration_days: Option<i64>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub departure_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Tour {
    fn id_field() -> &'static str {
        "tour_id"
    }

    fn record_id(&self) -> i64 {
        self.tour_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "tour_id" => Some(FieldValue::Integer(self.tour_id)),
            "title" => Some(self.title.clone().into()),
            "destination" => Some(self.destination.clone().into()),
            "price" => Some(self.price.into()),
            "duration_days" => Some(self.duration_days.into()),
            "departure_date" => Some(self.departure_date.into()),
            "average_rating" => Some(self.average_rating.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &[
            "title",
            "price",
            "duration_days",
            "departure_date",
            "average_rating",
            "created_at",
        ]
    }
}

pub fn spec() -> ListSpec {
    ListSpec::new(NAME, &["title", "destination"], PAGE_SIZE, "created_at")
}

/// Storefront filters on top of the text search
///
/// Tours with a null price are excluded once a budget bound is set, and
/// tours without a departure date once `departure_from` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TourFilter {
    /// Case-insensitive substring of the destination name
    pub destination: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Earliest departure day, inclusive
    pub departure_from: Option<NaiveDate>,
}

impl ScreenFilter<Tour> for TourFilter {
    fn check(&self) -> Result<(), QueryError> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => Err(QueryError::InvalidFilter {
                name: "min_price".to_string(),
                message: format!("{} is greater than max_price {}", min, max),
            }),
            _ => Ok(()),
        }
    }

    fn accepts(&self, tour: &Tour) -> bool {
        if let Some(wanted) = self.destination.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            let wanted = wanted.to_lowercase();
            let hit = tour
                .destination
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&wanted));
            if !hit {
                return false;
            }
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let Some(price) = tour.price else {
                return false;
            };
            if self.min_price.is_some_and(|min| price < min)
                || self.max_price.is_some_and(|max| price > max)
            {
                return false;
            }
        }

        if let Some(from) = self.departure_from {
            let Some(departure) = tour.departure_date else {
                return false;
            };
            if departure.date_naive() < from {
                return false;
            }
        }

        true
    }
}
