//! Plain-text output for command results.

#![allow(clippy::print_stdout)]

use loft_cart::{CartView, OrderSummary, StaticCatalog};
use loft_core::{CurrencyCode, Price};

pub fn print_cart(cart: &CartView) {
    if cart.items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("{:<22} {:<28} {:>5} {:>10} {:>10}", "ID", "ITEM", "QTY", "PRICE", "TOTAL");
    for item in &cart.items {
        let name = match item.duration_hours {
            Some(hours) => format!("{} ({hours}h)", item.name),
            None => item.name.clone(),
        };
        println!(
            "{:<22} {:<28} {:>5} {:>10} {:>10}",
            item.id, name, item.quantity, item.price, item.line_price
        );
    }
    println!();
    println!("{} item(s), subtotal {}", cart.item_count, cart.subtotal);
}

pub fn print_catalog(catalog: &StaticCatalog, currency: CurrencyCode) {
    println!("{:<22} {:<28} {:<11} {:>10}", "ID", "NAME", "CATEGORY", "PRICE");
    for entity in catalog.iter() {
        let price = Price::new(entity.unit_price, currency)
            .map_or_else(|_| entity.unit_price.to_string(), |p| p.display());
        println!(
            "{:<22} {:<28} {:<11} {:>10}",
            entity.id,
            entity.name,
            entity.category.as_str(),
            price
        );
    }
}

pub fn print_order(summary: &OrderSummary) {
    println!("Order placed:");
    for item in &summary.items {
        println!("  {} x {}  {}", item.quantity, item.name, item.line_total());
    }
    println!("Subtotal: {}", summary.subtotal);
}
