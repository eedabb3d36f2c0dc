//! Cart line items.

use loft_core::{CatalogEntity, Category, CurrencyCode, ItemId, Price, PriceError, Quantity};

/// One row of the cart: a distinct purchasable entity and how many of it.
///
/// `name`, `image_ref` and `duration_hours` ride along for display and play
/// no part in identity or totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
    pub image_ref: String,
    pub category: Category,
    pub duration_hours: Option<u32>,
}

impl CartLineItem {
    /// Build a row for `entity` with the given quantity.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the entity's price is below zero.
    pub fn from_entity(
        entity: &CatalogEntity,
        quantity: Quantity,
        currency: CurrencyCode,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            unit_price: Price::new(entity.unit_price, currency)?,
            quantity,
            image_ref: entity.image_ref.clone(),
            category: entity.category,
            duration_hours: entity.duration_hours,
        })
    }

    /// `unit_price × quantity`.
    ///
    /// Clamps at `Decimal::MAX`. Rows held by a cart always fit, see
    /// [`checked_subtotal`].
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.saturating_times(self.quantity)
    }

    /// `unit_price × quantity`, or `None` if it is not representable.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_times(self.quantity)
    }

    /// Fill display fields that came back empty from storage.
    pub(crate) fn fill_from(&mut self, entity: &CatalogEntity) {
        if self.name.is_empty() {
            self.name.clone_from(&entity.name);
        }
        if self.image_ref.is_empty() {
            self.image_ref.clone_from(&entity.image_ref);
        }
        if self.duration_hours.is_none() {
            self.duration_hours = entity.duration_hours;
        }
    }
}

/// Exact sum of line totals, or `None` if any step overflows.
///
/// A cart only ever holds rows for which this is `Some`.
pub fn checked_subtotal<'a>(
    items: impl IntoIterator<Item = &'a CartLineItem>,
    currency: CurrencyCode,
) -> Option<Price> {
    items.into_iter().try_fold(Price::zero(currency), |acc, item| {
        item.checked_line_total()
            .and_then(|total| acc.checked_plus(&total))
    })
}

/// Replace the row with `item`'s id in place, or append it.
pub(crate) fn upsert(items: &mut Vec<CartLineItem>, item: CartLineItem) {
    match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Whether `candidate` can join `items` (replacing any row with its id)
/// with the subtotal still representable.
pub(crate) fn fits(
    items: &[CartLineItem],
    candidate: &CartLineItem,
    currency: CurrencyCode,
) -> bool {
    let others = items.iter().filter(|existing| existing.id != candidate.id);
    checked_subtotal(others.chain(std::iter::once(candidate)), currency).is_some()
}
