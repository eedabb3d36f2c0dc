//! Checkout surface.
//!
//! Reads the cart for display, and once the (simulated) payment or booking
//! completes, tells the store to clear.

use loft_core::{Category, Price};
use thiserror::Error;
use tracing::info;

use crate::line_item::CartLineItem;
use crate::storage::KeyValueStorage;
use crate::store::CartStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub duration_hours: Option<u32>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_ref: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub is_open: bool,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category,
            duration_hours: item.duration_hours,
            quantity: item.quantity.get(),
            price: item.unit_price.display(),
            line_price: item.line_total().display(),
            image_ref: (!item.image_ref.is_empty()).then(|| item.image_ref.clone()),
        }
    }
}

impl<S: KeyValueStorage> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        Self {
            items: cart.line_items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
            is_open: cart.is_open(),
        }
    }
}

/// What was bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub items: Vec<CartLineItem>,
    pub item_count: u64,
    pub subtotal: Price,
}

/// An in-progress checkout holding the cart it will clear.
#[derive(Debug)]
pub struct Checkout<'a, S: KeyValueStorage> {
    cart: &'a mut CartStore<S>,
}

impl<'a, S: KeyValueStorage> Checkout<'a, S> {
    /// Start checking out `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to buy.
    pub fn begin(cart: &'a mut CartStore<S>) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self { cart })
    }

    /// Snapshot of the cart as it will be ordered.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            items: self.cart.line_items().to_vec(),
            item_count: self.cart.item_count(),
            subtotal: self.cart.subtotal(),
        }
    }

    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&*self.cart)
    }

    /// Finish the checkout: empty the cart and close the overlay.
    pub fn complete(self) -> OrderSummary {
        let summary = self.summary();
        self.cart.clear();
        self.cart.close_cart();
        info!(
            lines = summary.items.len(),
            units = summary.item_count,
            subtotal = %summary.subtotal.amount(),
            currency = summary.subtotal.currency_code().code(),
            "Checkout completed"
        );
        summary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use loft_core::{CatalogEntity, ItemId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::config::CartConfig;
    use crate::storage::MemoryStorage;

    fn cart_with_items() -> CartStore<MemoryStorage> {
        let mut cart = CartStore::hydrate(MemoryStorage::new(), &CartConfig::default());
        cart.add_item(
            &CatalogEntity::new("p1", "Candle", Decimal::new(1250, 2)).with_image("/c.jpg"),
            2,
        );
        cart.add_one(
            &CatalogEntity::new("room-a", "Studio A", Decimal::new(40, 0))
                .with_category(Category::Room)
                .with_duration_hours(2),
        );
        cart
    }

    #[test]
    fn test_cart_view() {
        let cart = cart_with_items();
        let view = CartView::from(&cart);

        assert_eq!(view.subtotal, "$65.00");
        assert_eq!(view.item_count, 3);
        assert!(view.is_open);
        assert_eq!(view.items[0].price, "$12.50");
        assert_eq!(view.items[0].line_price, "$25.00");
        assert_eq!(view.items[0].image_ref.as_deref(), Some("/c.jpg"));
        assert_eq!(view.items[1].image_ref, None);
        assert_eq!(view.items[1].duration_hours, Some(2));
    }

    #[test]
    fn test_begin_rejects_empty_cart() {
        let mut cart = CartStore::hydrate(MemoryStorage::new(), &CartConfig::default());
        assert_eq!(
            Checkout::begin(&mut cart).unwrap_err(),
            CheckoutError::EmptyCart
        );
    }

    #[test]
    fn test_complete_clears_and_returns_summary() {
        let mut cart = cart_with_items();
        let checkout = Checkout::begin(&mut cart).unwrap();
        assert_eq!(checkout.view().item_count, 3);

        let summary = checkout.complete();
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal.amount(), Decimal::new(65, 0));
        assert_eq!(summary.items[0].id, ItemId::new("p1"));

        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert_eq!(cart.storage().get("loft.cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_view_and_summary_at_decimal_max() {
        let mut cart = CartStore::hydrate(MemoryStorage::new(), &CartConfig::default());
        cart.add_one(&CatalogEntity::new("max", "Everything", Decimal::MAX));
        cart.add_one(&CatalogEntity::new("p1", "Candle", Decimal::ONE));

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 1);

        let summary = Checkout::begin(&mut cart).unwrap().complete();
        assert_eq!(summary.subtotal.amount(), Decimal::MAX);
        assert!(cart.is_empty());
    }
}
