//! Record types shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use royalbit_tabula::{FieldKind, FieldSchema, FieldValue, Policy, Schema, Tabular};

/// Header row `id, Quantity, due, price, active`; `note` is never exported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: String,
    pub qty: i64,
    pub due: Option<NaiveDate>,
    pub price: Option<f64>,
    pub active: bool,
    pub note: Option<String>,
}

impl Tabular for Order {
    fn schema() -> Schema {
        Schema::builder()
            .field(FieldSchema::new("id", FieldKind::Text).required())
            .field(
                FieldSchema::new("qty", FieldKind::Integer)
                    .column("Quantity")
                    .required(),
            )
            .field(FieldSchema::new("due", FieldKind::Date).date_format("yyyy-MM-dd"))
            .plain("price", FieldKind::Float)
            .plain("active", FieldKind::Boolean)
            .column("note", FieldKind::Text, "Note", Policy::Ignorable)
            .build()
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.as_str().into()),
            "qty" => Some(self.qty.into()),
            "due" => self.due.map(FieldValue::from),
            "price" => self.price.map(FieldValue::from),
            "active" => Some(self.active.into()),
            "note" => self.note.as_deref().map(FieldValue::from),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) -> bool {
        match field {
            "id" => match value.into_text() {
                Some(id) => self.id = id,
                None => return false,
            },
            "qty" => match value.as_i64() {
                Some(qty) => self.qty = qty,
                None => return false,
            },
            "due" => self.due = value.as_date(),
            "price" => self.price = value.as_f64(),
            "active" => match value.as_bool() {
                Some(active) => self.active = active,
                None => return false,
            },
            "note" => self.note = value.into_text(),
            _ => return false,
        }
        true
    }
}

/// The three-field record from the codec walkthrough
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub id: Option<String>,
    pub qty: Option<i64>,
    pub due: Option<NaiveDate>,
}

impl Tabular for Item {
    fn schema() -> Schema {
        Schema::builder()
            .field(FieldSchema::new("id", FieldKind::Text).required())
            .plain("qty", FieldKind::Integer)
            .field(FieldSchema::new("due", FieldKind::Date).date_format("yyyy-MM-dd"))
            .build()
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => self.id.as_deref().map(FieldValue::from),
            "qty" => self.qty.map(FieldValue::from),
            "due" => self.due.map(FieldValue::from),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) -> bool {
        match field {
            "id" => self.id = value.into_text(),
            "qty" => self.qty = value.as_i64(),
            "due" => self.due = value.as_date(),
            _ => return false,
        }
        true
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "A1".to_string(),
            qty: 3,
            due: Some(date(2024, 1, 5)),
            price: Some(2.5),
            active: true,
            note: None,
        },
        Order {
            id: "B7".to_string(),
            qty: 12,
            due: None,
            price: None,
            active: false,
            note: None,
        },
    ]
}
