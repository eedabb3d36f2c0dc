//! `loft cart ...` commands.

use loft_cart::CartView;
use loft_core::ItemId;
use tracing::info;

use super::render::print_cart;
use super::{CliError, Context};

/// Print the cart.
pub fn show(ctx: &Context) {
    print_cart(&CartView::from(&ctx.cart));
}

/// Add a catalog item to the cart.
///
/// # Errors
///
/// Returns `CliError::UnknownItem` if `id` is not in the catalog.
pub fn add(ctx: &mut Context, id: &str, quantity: i64) -> Result<(), CliError> {
    let entity = ctx
        .catalog
        .get(&ItemId::new(id))
        .ok_or_else(|| CliError::UnknownItem(id.to_owned()))?;

    ctx.cart.add_item(entity, quantity);
    info!(item_id = %id, "Added to cart");
    print_cart(&CartView::from(&ctx.cart));
    Ok(())
}

/// Remove an item. Unknown ids leave the cart untouched.
pub fn remove(ctx: &mut Context, id: &str) {
    ctx.cart.remove_item(&ItemId::new(id));
    print_cart(&CartView::from(&ctx.cart));
}

/// Set an item's quantity.
pub fn set(ctx: &mut Context, id: &str, quantity: i64) {
    ctx.cart.set_quantity(&ItemId::new(id), quantity);
    print_cart(&CartView::from(&ctx.cart));
}

/// Empty the cart.
pub fn clear(ctx: &mut Context) {
    ctx.cart.clear();
    info!("Cart cleared");
    print_cart(&CartView::from(&ctx.cart));
}
