//! Farmers' Market Cart - command-line shell over the cart store

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use farmers_market_cart::{
    CartPersistence, CartStore, CheckoutCoordinator, Config, FileStorage, HttpBackend, KeyValueStorage, Money,
    ProductId, ProductSnapshot, TokenStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add {
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: i64,
        #[arg(long)]
        original_price: Option<i64>,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        farm: String,
    },
    /// Remove a product line
    Remove { product_id: i64 },
    /// Set the quantity of a product line; zero or less removes it
    Quantity {
        product_id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Clear the cart remotely, then locally
    Clear,
    /// Replace the local cart with the server's
    Sync,
    /// Submit the cart as an order
    Checkout {
        #[arg(long)]
        member_id: i64,
        #[arg(long)]
        address: String,
    },
    /// Store the bearer token used for remote calls
    Login { token: String },
    /// Forget the stored bearer token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load()?;
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::open(&config.storage_dir)?);
    let tokens = TokenStore::new(storage.clone());
    let backend = Arc::new(HttpBackend::new(&config, tokens.clone())?);
    let store = Arc::new(CartStore::open(CartPersistence::new(storage), backend.clone()));
    tracing::debug!(base_url = %config.api_base_url, storage = %config.storage_dir.display(), "cart shell ready");

    match args.command {
        Command::Show => {}
        Command::Add { product_id, name, price, original_price, image, farm } => {
            let snapshot = ProductSnapshot {
                product_id: ProductId::new(product_id),
                name,
                price: Money::new(price),
                original_price: original_price.map(Money::new),
                image,
                farm,
            };
            store.add_item(snapshot).await?;
        }
        Command::Remove { product_id } => {
            store.remove_item(ProductId::new(product_id));
        }
        Command::Quantity { product_id, quantity } => {
            store.update_quantity(ProductId::new(product_id), quantity);
        }
        Command::Clear => store.clear_cart().await?,
        Command::Sync => {
            store.refresh_from_server().await?;
        }
        Command::Checkout { member_id, address } => {
            let response = CheckoutCoordinator::new(store.clone(), backend).checkout(member_id, &address).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }
        Command::Login { token } => {
            tokens.set_token(&token)?;
            tracing::info!("token stored");
            return Ok(());
        }
        Command::Logout => {
            tokens.clear_token()?;
            tracing::info!("token removed");
            return Ok(());
        }
    }

    println!("{}", serde_json::to_string_pretty(&store.state())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_accepts_negative_numbers() {
        let args = Args::try_parse_from(["farmers-market-cart", "quantity", "1", "-2"]).unwrap();
        assert!(matches!(args.command, Command::Quantity { product_id: 1, quantity: -2 }));
    }

    #[test]
    fn test_add_parses_product_fields() {
        let args = Args::try_parse_from([
            "farmers-market-cart", "add", "--product-id", "3", "--name", "Kale", "--price", "500", "--original-price", "600", "--farm", "Y",
        ])
        .unwrap();
        let Command::Add { product_id, name, price, original_price, image, farm } = args.command else { panic!("expected add") };
        assert_eq!((product_id, name.as_str(), price, original_price), (3, "Kale", 500, Some(600)));
        assert_eq!((image.as_str(), farm.as_str()), ("", "Y"));
    }

    #[test]
    fn test_checkout_requires_member_and_address() {
        let args = Args::try_parse_from(["farmers-market-cart", "checkout", "--member-id", "7", "--address", "Seoul"]).unwrap();
        let Command::Checkout { member_id, address } = args.command else { panic!("expected checkout") };
        assert_eq!((member_id, address.as_str()), (7, "Seoul"));
        assert!(Args::try_parse_from(["farmers-market-cart", "checkout", "--member-id", "7"]).is_err());
    }
}
