//! Account reviews screen

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::list::view::ListSpec;
use crate::screens::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "reviews";
pub const DEFAULT_PATH: &str = "/reviews/user";
pub const PAGE_SIZE: usize = 5;

/// A review the signed-in user left on a tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    #[serde(default)]
    pub tour_id: Option<i64>,
    #[serde(default)]
    pub tour_title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Review {
    fn id_field() -> &'static str {
        "review_id"
    }

    fn record_id(&self) -> i64 {
        self.review_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "review_id" => Some(FieldValue::Integer(self.review_id)),
            "tour_id" => Some(self.tour_id.into()),
            "tour_title" => Some(self.tour_title.clone().into()),
            "comment" => Some(self.comment.clone().into()),
            "rating" => Some(self.rating.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["review_id", "tour_title", "rating", "created_at"]
    }
}

pub fn spec() -> ListSpec {
    ListSpec::new(NAME, &["comment", "tour_title"], PAGE_SIZE, "created_at")
}
