//! Persisted projection of the cart.
//!
//! The stored blob is a JSON array of flat records holding primitives only:
//!
//! ```json
//! [{"id":"p1","name":"Candle","unitPrice":"12.50","quantity":2,
//!   "imageRef":"/img/candle.jpg","category":"product"}]
//! ```
//!
//! Decoding is defensive. The blob as a whole must be a JSON array, but each
//! record is judged on its own: a record without an `id` or `unitPrice` is
//! dropped, anything else that is missing or mistyped falls back to a safe
//! default.

use std::str::FromStr;

use loft_core::{Category, CurrencyCode, ItemId, Price, Quantity};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{CartError, Result};
use crate::line_item::{self, CartLineItem};

/// Wire shape of one stored record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem<'a> {
    id: &'a str,
    name: &'a str,
    unit_price: Decimal,
    quantity: u32,
    image_ref: &'a str,
    category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_hours: Option<u32>,
}

impl<'a> From<&'a CartLineItem> for StoredLineItem<'a> {
    fn from(item: &'a CartLineItem) -> Self {
        Self {
            id: item.id.as_str(),
            name: &item.name,
            unit_price: item.unit_price.amount(),
            quantity: item.quantity.get(),
            image_ref: &item.image_ref,
            category: item.category.as_str(),
            duration_hours: item.duration_hours,
        }
    }
}

/// Why a stored record was dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("record has no id")]
    MissingId,
    #[error("record has no usable unit price")]
    MissingPrice,
    #[error("record has a negative unit price")]
    NegativePrice,
    #[error("record has a non-positive quantity")]
    NonPositiveQuantity,
    #[error("record pushes the cart total past the representable range")]
    TotalOverflow,
}

/// Outcome of decoding a stored blob.
#[derive(Debug, Default)]
pub struct Decoded {
    /// Line items in stored order, one per id.
    pub items: Vec<CartLineItem>,
    /// Records that were dropped, with their position in the array.
    pub rejected: Vec<(usize, RecordError)>,
}

/// Serialize line items into the stored projection.
///
/// # Errors
///
/// Returns `CartError::Serialization` if serialization fails.
pub fn encode(items: &[CartLineItem]) -> Result<String> {
    let records: Vec<StoredLineItem<'_>> = items.iter().map(StoredLineItem::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a stored blob back into line items.
///
/// # Errors
///
/// Returns `CartError::Corrupt` if the blob is not a JSON array. Individual
/// bad records never fail the whole decode.
pub fn decode(blob: &str, currency: CurrencyCode) -> Result<Decoded> {
    let value: Value =
        serde_json::from_str(blob).map_err(|e| CartError::Corrupt(e.to_string()))?;
    let Value::Array(records) = value else {
        return Err(CartError::Corrupt(format!(
            "expected an array, found {}",
            kind_of(&value)
        )));
    };

    let mut decoded = Decoded::default();
    for (index, record) in records.iter().enumerate() {
        let admitted = decode_record(record, currency)
            .and_then(|item| merge(&mut decoded.items, item, currency));
        if let Err(reason) = admitted {
            decoded.rejected.push((index, reason));
        }
    }
    Ok(decoded)
}

/// Insert `item`, summing quantities if its id is already present.
///
/// Leaves `items` untouched if the result would overflow the subtotal.
fn merge(
    items: &mut Vec<CartLineItem>,
    item: CartLineItem,
    currency: CurrencyCode,
) -> std::result::Result<(), RecordError> {
    let candidate = match items.iter().find(|i| i.id == item.id) {
        Some(existing) => CartLineItem {
            quantity: existing.quantity.saturating_add(item.quantity),
            ..existing.clone()
        },
        None => item,
    };
    if !line_item::fits(items, &candidate, currency) {
        return Err(RecordError::TotalOverflow);
    }
    line_item::upsert(items, candidate);
    Ok(())
}

fn decode_record(
    record: &Value,
    currency: CurrencyCode,
) -> std::result::Result<CartLineItem, RecordError> {
    let Value::Object(fields) = record else {
        return Err(RecordError::NotAnObject);
    };

    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(RecordError::MissingId),
    };

    let amount = field(fields, "unitPrice", "price")
        .and_then(as_decimal)
        .ok_or(RecordError::MissingPrice)?;
    let unit_price = Price::new(amount, currency).map_err(|_| RecordError::NegativePrice)?;

    let quantity = match field(fields, "quantity", "qty") {
        None | Some(Value::Null) => Quantity::ONE,
        Some(v) => as_integer(v)
            .and_then(Quantity::from_signed)
            .ok_or(RecordError::NonPositiveQuantity)?,
    };

    Ok(CartLineItem {
        id: ItemId::new(id),
        name: string_field(fields, "name", "title"),
        unit_price,
        quantity,
        image_ref: string_field(fields, "imageRef", "image"),
        category: field(fields, "category", "type")
            .and_then(Value::as_str)
            .map(Category::parse_lenient)
            .unwrap_or_default(),
        duration_hours: field(fields, "durationHours", "duration")
            .and_then(as_integer)
            .and_then(|h| u32::try_from(h).ok()),
    })
}

/// Look up `key`, falling back to the legacy spelling `alias`.
fn field<'v>(fields: &'v Map<String, Value>, key: &str, alias: &str) -> Option<&'v Value> {
    fields.get(key).or_else(|| fields.get(alias))
}

fn string_field(fields: &Map<String, Value>, key: &str, alias: &str) -> String {
    field(fields, key, alias)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // 2.0 is a fine quantity, 2.5 is not.
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
