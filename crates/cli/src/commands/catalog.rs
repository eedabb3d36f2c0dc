//! `loft catalog ...` commands.

use super::Context;
use super::render::print_catalog;

/// Print every catalog entry.
pub fn list(ctx: &Context) {
    print_catalog(&ctx.catalog, ctx.cart.currency());
}
