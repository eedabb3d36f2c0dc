//! The cart state container.
//!
//! [`CartStore`] is the single source of truth for the visitor's cart. It is
//! constructed once at the application boundary and handed to whatever needs
//! it; there is no global instance.
//!
//! # Lifecycle
//!
//! hydrate → mutate → persist → (reload) → hydrate
//!
//! Every mutation writes the whole cart through to storage under one fixed
//! key. Nothing here returns an error to the caller: a corrupt blob becomes
//! an empty cart, a failed write is logged and the in-memory cart stays
//! authoritative.

use loft_core::{CatalogEntity, CurrencyCode, ItemId, Price, Quantity};
use tracing::{debug, info, instrument, warn};

use crate::catalog::ProductSource;
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::line_item::{self, CartLineItem};
use crate::projection;
use crate::storage::KeyValueStorage;

/// Cart contents, overlay state and the storage they persist to.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    storage: S,
    storage_key: String,
    currency: CurrencyCode,
    items: Vec<CartLineItem>,
    is_open: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store from whatever `storage` holds under the configured key.
    ///
    /// Never fails: missing or unreadable data yields an empty cart.
    pub fn hydrate(storage: S, config: &CartConfig) -> Self {
        Self::hydrate_inner(storage, config, None)
    }

    /// Like [`CartStore::hydrate`], then fill display fields that storage
    /// left empty from `catalog`.
    pub fn hydrate_with_catalog(
        storage: S,
        config: &CartConfig,
        catalog: &dyn ProductSource,
    ) -> Self {
        Self::hydrate_inner(storage, config, Some(catalog))
    }

    #[instrument(skip_all, fields(key = %config.storage_key))]
    fn hydrate_inner(
        storage: S,
        config: &CartConfig,
        catalog: Option<&dyn ProductSource>,
    ) -> Self {
        let mut items = match load(&storage, &config.storage_key, config.currency) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Could not restore cart, starting empty");
                Vec::new()
            }
        };

        if let Some(catalog) = catalog {
            for item in &mut items {
                match catalog.lookup(&item.id) {
                    Some(entity) => item.fill_from(&entity),
                    None => debug!(item_id = %item.id, "Stored item not in catalog"),
                }
            }
        }

        info!(
            lines = items.len(),
            currency = config.currency.code(),
            "Cart hydrated"
        );

        Self {
            storage,
            storage_key: config.storage_key.clone(),
            currency: config.currency,
            items,
            is_open: false,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `delta` units of `entity`, or one unit if `delta` is below one.
    ///
    /// Increments the existing row for the entity's id, or appends a new one.
    /// Opens the cart overlay. An add that would push the subtotal past what
    /// a `Decimal` can hold is ignored.
    pub fn add_item(&mut self, entity: &CatalogEntity, delta: i64) {
        if entity.id.is_empty() {
            warn!("Ignoring add of catalog entity without an id");
            return;
        }

        let quantity = Quantity::from_delta(delta);
        let candidate = match self.get(&entity.id) {
            Some(existing) => CartLineItem {
                quantity: existing.quantity.saturating_add(quantity),
                ..existing.clone()
            },
            None => match CartLineItem::from_entity(entity, quantity, self.currency) {
                Ok(item) => item,
                Err(e) => {
                    warn!(item_id = %entity.id, error = %e, "Ignoring add of invalid catalog entity");
                    return;
                }
            },
        };

        if !line_item::fits(&self.items, &candidate, self.currency) {
            warn!(
                item_id = %entity.id,
                "Ignoring add that would overflow the cart subtotal"
            );
            return;
        }

        line_item::upsert(&mut self.items, candidate);
        debug!(item_id = %entity.id, added = quantity.get(), "Added to cart");
        self.is_open = true;
        self.persist();
    }

    /// Add a single unit of `entity`.
    pub fn add_one(&mut self, entity: &CatalogEntity) {
        self.add_item(entity, 1);
    }

    /// Delete the row for `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ItemId) {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            debug!(item_id = %id, "Remove of unknown cart item ignored");
            return;
        }

        debug!(item_id = %id, "Removed from cart");
        self.persist();
    }

    /// Set the quantity for `id`. Anything below one removes the row.
    /// Unknown ids, and quantities that would overflow the subtotal, are
    /// ignored.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) {
        let Some(quantity) = Quantity::from_signed(quantity) else {
            self.remove_item(id);
            return;
        };

        let Some(item) = self.get(id) else {
            debug!(item_id = %id, "Quantity update for unknown cart item ignored");
            return;
        };

        let candidate = CartLineItem {
            quantity,
            ..item.clone()
        };
        if !line_item::fits(&self.items, &candidate, self.currency) {
            warn!(
                item_id = %id,
                quantity = quantity.get(),
                "Ignoring quantity that would overflow the cart subtotal"
            );
            return;
        }

        line_item::upsert(&mut self.items, candidate);
        debug!(item_id = %id, quantity = quantity.get(), "Cart quantity set");
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cart cleared");
        self.persist();
    }

    pub const fn open_cart(&mut self) {
        self.is_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.is_open = false;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Rows in insertion order.
    #[must_use]
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Total units across all rows.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `unit_price × quantity` over all rows.
    ///
    /// Exact: mutations and hydration refuse rows that would make it
    /// unrepresentable.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::zero(self.currency), |acc, item| {
                acc.saturating_plus(&item.line_total())
            })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the cart through to storage, logging any failure.
    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!(
                key = %self.storage_key,
                error = %e,
                "Failed to persist cart; keeping in-memory state"
            );
        }
    }

    fn try_persist(&self) -> Result<()> {
        let blob = projection::encode(&self.items)?;
        self.storage
            .set(&self.storage_key, &blob)
            .map_err(CartError::StorageWrite)
    }
}

/// Read and decode the stored cart. `Ok(empty)` when nothing is stored.
fn load<S: KeyValueStorage>(
    storage: &S,
    key: &str,
    currency: CurrencyCode,
) -> Result<Vec<CartLineItem>> {
    let Some(blob) = storage.get(key).map_err(CartError::StorageRead)? else {
        debug!("No stored cart");
        return Ok(Vec::new());
    };

    let decoded = projection::decode(&blob, currency)?;
    for (index, reason) in &decoded.rejected {
        warn!(index, %reason, "Dropped unusable stored cart record");
    }
    Ok(decoded.items)
}
