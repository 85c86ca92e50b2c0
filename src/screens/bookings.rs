//! Admin bookings screen

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::list::view::ListSpec;
use crate::screens::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "bookings";
pub const DEFAULT_PATH: &str = "/admin/bookings";
pub const PAGE_SIZE: usize = 7;

/// A booking as listed in the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    #[serde(default)]
    pub booking_code: Option<String>,
    #[serde(default)]
    pub tour_id: Option<i64>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub num_adults: Option<i64>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub num_children: Option<i64>,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Booking {
    fn id_field() -> &'static str {
        "booking_id"
    }

    fn record_id(&self) -> i64 {
        self.booking_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "booking_id" => Some(FieldValue::Integer(self.booking_id)),
            "booking_code" => Some(self.booking_code.clone().into()),
            "tour_id" => Some(self.tour_id.into()),
            "contact_name" => Some(self.contact_name.clone().into()),
            "contact_email" => Some(self.contact_email.clone().into()),
            "contact_phone" => Some(self.contact_phone.clone().into()),
            "num_adults" => Some(self.num_adults.into()),
            "num_children" => Some(self.num_children.into()),
            "final_price" => Some(self.final_price.into()),
            "status" => Some(self.status.clone().into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &[
            "booking_id",
            "booking_code",
            "contact_name",
            "contact_email",
            "final_price",
            "status",
            "created_at",
        ]
    }
}

pub fn spec() -> ListSpec {
    ListSpec::new(
        NAME,
        &["booking_code", "contact_email", "contact_phone", "contact_name"],
        PAGE_SIZE,
        "created_at",
    )
}
