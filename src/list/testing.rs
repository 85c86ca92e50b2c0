//! Minimal record used by the list engine unit tests

use crate::core::field::FieldValue;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: i64,
    pub code: Option<String>,
    pub note: Option<String>,
    pub price: Option<f64>,
}

impl Row {
    /// Rows with ids 1.. and the given codes
    pub fn many(codes: &[&str]) -> Vec<Row> {
        codes
            .iter()
            .enumerate()
            .map(|(i, code)| Row {
                id: i as i64 + 1,
                code: Some(code.to_string()),
                note: None,
                price: None,
            })
            .collect()
    }

    /// Rows with ids 1.. and the given prices
    pub fn priced(prices: &[Option<f64>]) -> Vec<Row> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| Row {
                id: i as i64 + 1,
                code: Some(format!("row-{}", i + 1)),
                note: None,
                price: *price,
            })
            .collect()
    }
}

impl Record for Row {
    fn id_field() -> &'static str {
        "id"
    }

    fn record_id(&self) -> i64 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Integer(self.id)),
            "code" => Some(self.code.clone().into()),
            "note" => Some(self.note.clone().into()),
            "price" => Some(self.price.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["id", "code", "price"]
    }
}
