//! Loft Cart - the visitor's shopping cart.
//!
//! A single-tab state container for cart contents with write-through
//! persistence to a browser-local-storage style key-value store.
//!
//! # Modules
//!
//! - [`store`] - [`CartStore`]: mutations, derived totals, hydrate/persist
//! - [`projection`] - The flat JSON format the cart is stored in
//! - [`storage`] - Key-value backends (in-memory, file-backed)
//! - [`catalog`] - Read-only product source used to resolve display data
//! - [`checkout`] - Cart views and the checkout hand-off that clears the cart
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```
//! use loft_cart::{CartConfig, CartStore, MemoryStorage};
//! use loft_core::{CatalogEntity, ItemId};
//! use rust_decimal::Decimal;
//!
//! let storage = MemoryStorage::new();
//! let config = CartConfig::default();
//!
//! let mut cart = CartStore::hydrate(storage.clone(), &config);
//! let candle = CatalogEntity::new("p1", "Candle", Decimal::new(10, 0));
//! cart.add_one(&candle);
//! cart.add_one(&candle);
//! assert_eq!(cart.subtotal().amount(), Decimal::new(20, 0));
//!
//! // A reload reads the same storage key back.
//! let reloaded = CartStore::hydrate(storage, &config);
//! assert_eq!(reloaded.get(&ItemId::new("p1")).map(|i| i.quantity.get()), Some(2));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod line_item;
pub mod projection;
pub mod storage;
pub mod store;

pub use catalog::{CatalogError, ProductSource, StaticCatalog};
pub use checkout::{CartItemView, CartView, Checkout, CheckoutError, OrderSummary};
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use line_item::CartLineItem;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
