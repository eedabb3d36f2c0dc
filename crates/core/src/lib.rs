//! Loft Core - Shared domain types.
//!
//! This crate provides the types used across all Loft components:
//! - `cart` - Client-side cart state container and its persistence
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities and catalog entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
