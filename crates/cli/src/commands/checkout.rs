//! `loft checkout`.
//!
//! Payment is simulated: completing the checkout just records the order
//! summary in the log and empties the cart.

use loft_cart::Checkout;
use tracing::info;

use super::render::print_order;
use super::{CliError, Context};

/// Complete checkout for the current cart.
///
/// # Errors
///
/// Returns `CliError::Checkout` if the cart is empty.
pub fn complete(ctx: &mut Context) -> Result<(), CliError> {
    let checkout = Checkout::begin(&mut ctx.cart)?;
    let summary = checkout.complete();
    info!(subtotal = %summary.subtotal, "Order placed");
    print_order(&summary);
    Ok(())
}
