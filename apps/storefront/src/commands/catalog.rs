//! # Catalog Commands
//!
//! Menu browsing for UI surfaces.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_categories() ──► [Mains, Sides, Drinks]                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  list_products("mains") ──► [Classic Burger, Margherita Pizza]          │
//! │        │                                                                │
//! │        ├── search_products("cheese") (search box, any category)         │
//! │        ▼                                                                │
//! │  get_product("burger") ──► detail view with extras ──► add_to_cart      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogProduct, Category};
use crate::error::ApiError;

/// Lists menu categories in display order.
pub async fn list_categories(catalog: &dyn Catalog) -> Result<Vec<Category>, ApiError> {
    debug!("list_categories command");
    Ok(catalog.categories().await?)
}

/// Lists the products of one category.
pub async fn list_products(
    catalog: &dyn Catalog,
    category_id: &str,
) -> Result<Vec<CatalogProduct>, ApiError> {
    debug!(category_id, "list_products command");
    Ok(catalog.products(category_id).await?)
}

/// Searches product names and descriptions.
///
/// ## Behavior
/// - Case-insensitive substring match
/// - Empty query returns every product
/// - Queries over 100 characters are rejected
pub async fn search_products(
    catalog: &dyn Catalog,
    query: &str,
) -> Result<Vec<CatalogProduct>, ApiError> {
    debug!(query, "search_products command");

    let start = Instant::now();
    let products = catalog.search(query).await?;

    info!(
        query,
        results = products.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Product search completed"
    );

    Ok(products)
}

/// Gets a single product for the detail view.
pub async fn get_product(
    catalog: &dyn Catalog,
    product_id: &str,
) -> Result<CatalogProduct, ApiError> {
    debug!(product_id, "get_product command");
    Ok(catalog.product(product_id).await?)
}
