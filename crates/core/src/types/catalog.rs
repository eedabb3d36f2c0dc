//! Catalog entities: anything a page can put in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ItemId;

/// What kind of purchasable a catalog entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Physical goods from the shop.
    #[default]
    Product,
    /// Private-space reservation, usually priced per hour.
    Room,
    /// Class registration.
    Class,
    /// Community membership.
    Membership,
}

impl Category {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Room => "room",
            Self::Class => "class",
            Self::Membership => "membership",
        }
    }

    /// Parse a tag, falling back to [`Category::Product`] for anything
    /// unrecognised.
    #[must_use]
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "room" | "space" => Self::Room,
            "class" | "workshop" => Self::Class,
            "membership" => Self::Membership,
            _ => Self::Product,
        }
    }
}

/// A catalog listing eligible to become a cart line item.
///
/// Pages hand one of these to the cart when the visitor clicks "add".
/// Only `id` is load-bearing for cart identity; `unit_price` feeds totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntity {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub category: Category,
    /// Booking length for rooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<u32>,
}

impl CatalogEntity {
    /// Minimal entity with the fields every listing has.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_ref: String::new(),
            category: Category::Product,
            duration_hours: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = Some(hours);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_lenient() {
        assert_eq!(Category::parse_lenient("room"), Category::Room);
        assert_eq!(Category::parse_lenient("Class"), Category::Class);
        assert_eq!(Category::parse_lenient("membership"), Category::Membership);
        assert_eq!(Category::parse_lenient("gift-card"), Category::Product);
        assert_eq!(Category::parse_lenient(""), Category::Product);
    }

    #[test]
    fn test_catalog_entity_from_json_defaults() {
        let json = r#"{"id":"p1","name":"Candle","unitPrice":"12.50"}"#;
        let entity: CatalogEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id.as_str(), "p1");
        assert_eq!(entity.unit_price, Decimal::new(1250, 2));
        assert_eq!(entity.category, Category::Product);
        assert!(entity.image_ref.is_empty());
        assert!(entity.duration_hours.is_none());
    }

    #[test]
    fn test_catalog_entity_builder() {
        let room = CatalogEntity::new("room-a", "Studio A", Decimal::new(40, 0))
            .with_category(Category::Room)
            .with_duration_hours(2)
            .with_image("/img/studio-a.jpg");
        assert_eq!(room.category, Category::Room);
        assert_eq!(room.duration_hours, Some(2));
        assert_eq!(room.image_ref, "/img/studio-a.jpg");
    }
}
