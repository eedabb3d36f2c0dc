//! Core types for Loft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod price;
pub mod quantity;

pub use catalog::{CatalogEntity, Category};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use quantity::Quantity;
