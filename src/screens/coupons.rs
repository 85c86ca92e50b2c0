//! Admin coupons screen

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::list::view::ListSpec;
use crate::screens::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "coupons";
pub const DEFAULT_PATH: &str = "/admin/coupons";
pub const PAGE_SIZE: usize = 7;

/// A discount coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub coupon_id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// "percentage" or "fixed"
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub discount_value: Option<f64>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub usage_limit: Option<i64>,
    #[serde(default, deserialize_with = "de::i64_or_string")]
    pub used_count: Option<i64>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::bool_or_int")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "de::datetime_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Coupon {
    fn id_field() -> &'static str {
        "coupon_id"
    }

    fn record_id(&self) -> i64 {
        self.coupon_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "coupon_id" => Some(FieldValue::Integer(self.coupon_id)),
            "code" => Some(self.code.clone().into()),
            "description" => Some(self.description.clone().into()),
            "discount_type" => Some(self.discount_type.clone().into()),
            "discount_value" => Some(self.discount_value.into()),
            "usage_limit" => Some(self.usage_limit.into()),
            "used_count" => Some(self.used_count.into()),
            "valid_from" => Some(self.valid_from.into()),
            "valid_to" => Some(self.valid_to.into()),
            "is_active" => Some(self.is_active.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &[
            "coupon_id",
            "code",
            "discount_type",
            "discount_value",
            "usage_limit",
            "used_count",
            "valid_from",
            "valid_to",
            "is_active",
            "created_at",
        ]
    }
}

pub fn spec() -> ListSpec {
    ListSpec::new(NAME, &["code", "description"], PAGE_SIZE, "created_at")
}
