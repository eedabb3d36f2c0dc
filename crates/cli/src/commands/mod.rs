//! Command implementations.
//!
//! Every command runs against a [`Context`]: the cart hydrated from the
//! configured storage directory and the catalog it resolves ids against.

pub mod cart;
pub mod catalog;
pub mod checkout;
mod render;

use loft_cart::{
    CartConfig, CartStore, CatalogError, CheckoutError, FileStorage, StaticCatalog, StorageError,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog file could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The id is not in the catalog.
    #[error("Unknown catalog item: {0}")]
    UnknownItem(String),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Hydrated cart plus the catalog it draws from.
pub struct Context {
    pub cart: CartStore<FileStorage>,
    pub catalog: StaticCatalog,
}

impl Context {
    /// Open storage, load the catalog and hydrate the cart.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the storage directory or catalog file cannot be
    /// used. A corrupt stored cart is not an error.
    pub fn open(config: &CartConfig) -> Result<Self, CliError> {
        let mut storage = FileStorage::open(&config.storage_dir)?;
        if let Some(quota) = config.storage_quota_bytes {
            storage = storage.with_quota(quota);
        }

        let catalog = match &config.catalog_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading catalog");
                StaticCatalog::from_path(path)?
            }
            None => StaticCatalog::builtin(),
        };

        let cart = CartStore::hydrate_with_catalog(storage, config, &catalog);
        Ok(Self { cart, catalog })
    }
}
