//! Integration tests for Loft.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loft-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - hydrate, mutate, persist, reload across store instances
//! - `cart_resilience` - corrupt, partial and unwritable storage
//! - `cart_invariants` - identity, totals and quantity floor over op sequences
//!
//! This library holds the shared fixtures.

use loft_cart::{CartConfig, CartStore, KeyValueStorage, MemoryStorage};
use loft_core::{CatalogEntity, Category};
use rust_decimal::Decimal;

/// A catalog entity priced in whole currency units.
#[must_use]
pub fn product(id: &str, price: i64) -> CatalogEntity {
    CatalogEntity::new(id, format!("Product {id}"), Decimal::new(price, 0))
        .with_image(format!("/images/{id}.jpg"))
}

/// A bookable room priced per booking.
#[must_use]
pub fn room(id: &str, price: i64, hours: u32) -> CatalogEntity {
    CatalogEntity::new(id, format!("Room {id}"), Decimal::new(price, 0))
        .with_category(Category::Room)
        .with_duration_hours(hours)
}

/// Open a new "tab": a store hydrated from storage shared with other tabs.
#[must_use]
pub fn open_tab<S: KeyValueStorage>(storage: S) -> CartStore<S> {
    CartStore::hydrate(storage, &CartConfig::default())
}

/// Fresh shared in-memory browser storage.
#[must_use]
pub fn browser_storage() -> MemoryStorage {
    MemoryStorage::new()
}

/// `(id, quantity, unit price)` for every row, in order.
#[must_use]
pub fn tuples<S: KeyValueStorage>(cart: &CartStore<S>) -> Vec<(String, u32, Decimal)> {
    cart.line_items()
        .iter()
        .map(|item| {
            (
                item.id.to_string(),
                item.quantity.get(),
                item.unit_price.amount(),
            )
        })
        .collect()
}
