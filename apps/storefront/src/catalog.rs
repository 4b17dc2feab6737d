//! # Catalog Collaborator
//!
//! Category and product lookups feeding the cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (trait)                                                        │
//! │     │                                                                   │
//! │     ├── categories()       ──► Vec<Category>                            │
//! │     ├── products(category) ──► Vec<CatalogProduct>                      │
//! │     ├── search(query)      ──► Vec<CatalogProduct>                      │
//! │     └── product(id)        ──► CatalogProduct ──► snapshot() ──► cart   │
//! │                                                                         │
//! │  The cart reads the catalog exactly once per add. Everything after      │
//! │  that works on the frozen ProductSnapshot.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_core::{DiscountMeta, Money, ProductSnapshot};
use thiserror::Error;
use tracing::{debug, info};

/// Longest accepted search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A product as the catalog serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    pub unit_price: Money,
    #[serde(default)]
    pub discount: Option<DiscountMeta>,
    #[serde(default)]
    pub is_customizable: bool,
    #[serde(default)]
    pub available_extras: Vec<String>,
}

impl CatalogProduct {
    /// Freezes the record for the cart.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            image_ref: self.image_ref.clone(),
            unit_price: self.unit_price,
            discount: self.discount.clone(),
            is_customizable: self.is_customizable,
            available_extras: self.available_extras.clone(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Search query must be at most {max} characters")]
    QueryTooLong { max: usize },

    /// Backend unreachable or returned garbage.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Trait
// =============================================================================

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn categories(&self) -> CatalogResult<Vec<Category>>;

    async fn products(&self, category_id: &str) -> CatalogResult<Vec<CatalogProduct>>;

    /// Case-insensitive match on name and description. An empty query
    /// returns every product.
    async fn search(&self, query: &str) -> CatalogResult<Vec<CatalogProduct>>;

    async fn product(&self, product_id: &str) -> CatalogResult<CatalogProduct>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// JSON layout accepted by [`InMemoryCatalog::from_json_file`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<Category>,
    pub products: Vec<CatalogProduct>,
}

/// Catalog held in memory, products kept in file order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    products: Vec<CatalogProduct>,
    by_id: BTreeMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new(categories: Vec<Category>, products: Vec<CatalogProduct>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();

        InMemoryCatalog {
            categories,
            products,
            by_id,
        }
    }

    /// Loads a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let file: CatalogFile = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", path.display(), e)))?;

        info!(
            ?path,
            categories = file.categories.len(),
            products = file.products.len(),
            "Catalog loaded"
        );
        Ok(Self::new(file.categories, file.products))
    }

    /// Small built-in menu for development and demos.
    pub fn demo() -> Self {
        let categories = vec![
            category("mains", "Mains"),
            category("sides", "Sides"),
            category("drinks", "Drinks"),
        ];

        let mut burger = product("burger", "mains", "Classic Burger", 1250);
        burger.description = Some("Beef patty, cheddar, pickles".to_string());
        burger.is_customizable = true;
        burger.available_extras = vec![
            "bacon".to_string(),
            "extra cheese".to_string(),
            "jalapeños".to_string(),
        ];

        let mut pizza = product("pizza", "mains", "Margherita Pizza", 2500);
        pizza.description = Some("Tomato, mozzarella, basil".to_string());
        pizza.is_customizable = true;
        pizza.available_extras = vec!["olives".to_string(), "mushrooms".to_string()];

        let mut fries = product("fries", "sides", "Fries", 450);
        fries.discount = Some(DiscountMeta {
            label: Some("Happy hour".to_string()),
            original_price: Some(Money::from_cents(550)),
            percent_off_bps: None,
        });

        let products = vec![
            burger,
            pizza,
            fries,
            product("salad", "sides", "Side Salad", 500),
            product("lemonade", "drinks", "Lemonade", 350),
            product("cola", "drinks", "Cola", 300),
        ];

        Self::new(categories, products)
    }

    fn has_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn product(id: &str, category_id: &str, name: &str, price_cents: i64) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        category_id: category_id.to_string(),
        name: name.to_string(),
        description: None,
        image_ref: Some(format!("/images/{id}.jpg")),
        unit_price: Money::from_cents(price_cents),
        discount: None,
        is_customizable: false,
        available_extras: Vec::new(),
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn products(&self, category_id: &str) -> CatalogResult<Vec<CatalogProduct>> {
        if !self.has_category(category_id) {
            return Err(CatalogError::CategoryNotFound(category_id.to_string()));
        }

        Ok(self
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<CatalogProduct>> {
        let query = query.trim();
        if query.chars().count() > MAX_SEARCH_QUERY_LEN {
            return Err(CatalogError::QueryTooLong {
                max: MAX_SEARCH_QUERY_LEN,
            });
        }

        let needle = query.to_lowercase();
        let hits: Vec<CatalogProduct> = self
            .products
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect();

        debug!(query, hits = hits.len(), "Catalog search");
        Ok(hits)
    }

    async fn product(&self, product_id: &str) -> CatalogResult<CatalogProduct> {
        self.by_id
            .get(product_id)
            .map(|&index| self.products[index].clone())
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))
    }
}
