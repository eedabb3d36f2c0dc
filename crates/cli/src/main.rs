//! Loft CLI - drive a cart stored on disk.
//!
//! Each invocation is one "page load": the cart is hydrated from the storage
//! directory, one action runs, and the result is written back.
//!
//! # Usage
//!
//! ```bash
//! # List what can be added
//! loft catalog list
//!
//! # Add two mugs and a studio booking
//! loft cart add mug-stoneware -q 2
//! loft cart add room-studio-a
//!
//! # Inspect and adjust
//! loft cart show
//! loft cart set mug-stoneware 1
//! loft cart remove room-studio-a
//!
//! # Complete the (simulated) checkout, which empties the cart
//! loft checkout
//! ```
//!
//! # Environment Variables
//!
//! See `loft_cart::config`. `RUST_LOG` controls log filtering and
//! `LOFT_LOG_FORMAT=json` switches logs to JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use loft_cart::CartConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "loft")]
#[command(author, version, about = "Loft storefront cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Complete checkout and empty the cart
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a catalog item
    Add {
        /// Catalog id
        id: String,

        /// Units to add (values below one add a single unit)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove an item entirely
    Remove {
        /// Catalog id
        id: String,
    },
    /// Set an item's quantity (zero or less removes it)
    Set {
        /// Catalog id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List catalog entries
    List,
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loft_cart=info,loft_cli=info".into());

    let json = std::env::var("LOFT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Logs go to stderr so command output stays clean on stdout.
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let mut ctx = commands::Context::open(&config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id, quantity } => commands::cart::add(&mut ctx, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id),
            CartAction::Set { id, quantity } => commands::cart::set(&mut ctx, &id, quantity),
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&ctx),
        },
        Commands::Checkout => commands::checkout::complete(&mut ctx)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_set_quantity() {
        let cli = Cli::try_parse_from(["loft", "cart", "set", "p1", "-2"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Set { quantity: -2, .. }
            })
        ));
    }
}
