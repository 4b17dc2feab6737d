//! # Storefront Library
//!
//! Application layer of the online ordering storefront. Wires the session
//! cart from `storefront-core` to the catalog and order submission
//! collaborators, and exposes every operation as a plain command function.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (App context & logging setup)
//! ├── main.rs         ◄─── Terminal entry point
//! ├── shell.rs        ◄─── Line-oriented terminal front-end
//! ├── catalog.rs      ◄─── Catalog trait + in-memory catalog
//! ├── submission.rs   ◄─── OrderSubmitter trait + simulated submitter
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Session cart (Arc<Mutex<CartStore>>)
//! │   └── config.rs   ◄─── StoreConfig (file + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Menu browsing commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order placement
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Application Context
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    App                                                  │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌───────────────┐ ┌──────────────┐  │
//! │  │ StoreConfig  │ │ CartState    │ │ Arc<dyn       │ │ Arc<dyn      │  │
//! │  │              │ │              │ │   Catalog>    │ │ OrderSub-    │  │
//! │  │ read-only    │ │ one per      │ │               │ │   mitter>    │  │
//! │  │              │ │ session      │ │ JSON or demo  │ │ simulated    │  │
//! │  └──────────────┘ └──────────────┘ └───────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  Commands borrow only the pieces they need.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;
pub mod submission;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::{Catalog, CatalogResult, InMemoryCatalog};
use state::{CartState, StoreConfig};
use submission::{OrderSubmitter, SimulatedSubmitter};

/// Everything one storefront session needs.
#[derive(Clone)]
pub struct App {
    pub config: StoreConfig,
    pub catalog: Arc<dyn Catalog>,
    pub submitter: Arc<dyn OrderSubmitter>,
    pub cart: CartState,
}

impl App {
    /// Assembles an app from explicit collaborators.
    pub fn new(
        config: StoreConfig,
        catalog: Arc<dyn Catalog>,
        submitter: Arc<dyn OrderSubmitter>,
    ) -> Self {
        let cart = CartState::new(config.pricing_rules());
        App {
            config,
            catalog,
            submitter,
            cart,
        }
    }

    /// Builds the default collaborators from configuration.
    ///
    /// ## Collaborators
    /// - Catalog: `catalog_path` JSON file, else the built-in demo menu
    /// - Submitter: simulated, confirming after `submission_delay_ms`
    pub fn from_config(config: StoreConfig) -> CatalogResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => InMemoryCatalog::from_json_file(path)?,
            None => {
                info!("No catalog path configured, using demo menu");
                InMemoryCatalog::demo()
            }
        };

        let submitter = SimulatedSubmitter::new(Duration::from_millis(config.submission_delay_ms));

        Ok(Self::new(config, Arc::new(catalog), Arc::new(submitter)))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace the app crate only
/// - Default: `info,storefront=debug`
///
/// Logs go to stderr so they never interleave with shell output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::commands::cart::{add_to_cart, AddToCartRequest};

    #[tokio::test]
    async fn test_from_config_uses_demo_menu_and_fee() {
        let config = StoreConfig {
            delivery_fee_cents: 250,
            ..StoreConfig::default()
        };
        let app = App::from_config(config).unwrap();

        let response = add_to_cart(
            app.catalog.as_ref(),
            &app.cart,
            AddToCartRequest::new("cola"),
        )
        .await
        .unwrap();

        assert_eq!(response.pricing.delivery_fee.cents(), 250);
        assert_eq!(response.pricing.total.cents(), 550);
    }

    #[tokio::test]
    async fn test_from_config_loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories": [], "products": [
                {{"id": "tea", "categoryId": "drinks", "name": "Tea", "unitPrice": 200}}
            ]}}"#
        )
        .unwrap();

        let config = StoreConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..StoreConfig::default()
        };
        let app = App::from_config(config).unwrap();

        assert_eq!(app.catalog.product("tea").await.unwrap().name, "Tea");
        assert!(app.catalog.product("burger").await.is_err());
    }

    #[test]
    fn test_from_config_missing_catalog_file() {
        let config = StoreConfig {
            catalog_path: Some("/no/such/menu.json".into()),
            ..StoreConfig::default()
        };
        assert!(App::from_config(config).is_err());
    }
}
