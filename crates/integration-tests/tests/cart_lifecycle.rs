//! Integration tests for the hydrate → mutate → persist → rehydrate cycle.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use loft_cart::{CartConfig, CartStore, Checkout, FileStorage, KeyValueStorage, StaticCatalog};
use loft_core::ItemId;
use loft_integration_tests::{browser_storage, open_tab, product, room, tuples};
use rust_decimal::Decimal;

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_reload_restores_id_quantity_and_price() {
    let storage = browser_storage();

    let mut tab = open_tab(storage.clone());
    tab.add_item(&product("p1", 10), 2);
    tab.add_one(&room("studio-a", 40, 2));
    let before = tuples(&tab);
    drop(tab);

    let reloaded = open_tab(storage);
    assert_eq!(tuples(&reloaded), before);
    assert_eq!(reloaded.subtotal().amount(), Decimal::new(60, 0));
}

#[test]
fn test_reload_keeps_display_fields_from_projection() {
    let storage = browser_storage();
    let mut tab = open_tab(storage.clone());
    tab.add_one(&room("studio-a", 40, 3));

    let reloaded = open_tab(storage);
    let item = &reloaded.line_items()[0];
    assert_eq!(item.name, "Room studio-a");
    assert_eq!(item.duration_hours, Some(3));
}

#[test]
fn test_reload_does_not_restore_open_overlay() {
    let storage = browser_storage();
    let mut tab = open_tab(storage.clone());
    tab.add_one(&product("p1", 1));
    assert!(tab.is_open());

    assert!(!open_tab(storage).is_open());
}

#[test]
fn test_file_storage_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = CartConfig {
        storage_dir: dir.path().to_path_buf(),
        ..CartConfig::default()
    };
    let catalog = StaticCatalog::builtin();

    {
        let storage = FileStorage::open(&config.storage_dir).unwrap();
        let mut cart = CartStore::hydrate_with_catalog(storage, &config, &catalog);
        let mug = catalog.get(&ItemId::new("mug-stoneware")).unwrap();
        cart.add_item(mug, 3);
        cart.set_quantity(&ItemId::new("mug-stoneware"), 2);
    }

    let storage = FileStorage::open(&config.storage_dir).unwrap();
    let cart = CartStore::hydrate_with_catalog(storage, &config, &catalog);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal().display(), "$36.00");
}

// =============================================================================
// Multi-tab Tests
// =============================================================================

#[test]
fn test_last_write_wins_across_tabs() {
    let storage = browser_storage();
    let mut tab_a = open_tab(storage.clone());
    let mut tab_b = open_tab(storage.clone());

    tab_a.add_one(&product("from-a", 1));
    tab_b.add_one(&product("from-b", 1));

    // Tab B never saw tab A's item and overwrote the whole blob.
    let reloaded = open_tab(storage);
    let ids: Vec<_> = reloaded.line_items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["from-b"]);
}

// =============================================================================
// Checkout Tests
// =============================================================================

#[test]
fn test_checkout_clears_persisted_cart() {
    let storage = browser_storage();
    let mut tab = open_tab(storage.clone());
    tab.add_item(&product("p1", 10), 2);

    let summary = Checkout::begin(&mut tab).unwrap().complete();
    assert_eq!(summary.subtotal.amount(), Decimal::new(20, 0));

    assert!(open_tab(storage.clone()).is_empty());
    assert_eq!(storage.get("loft.cart").unwrap().as_deref(), Some("[]"));
}
