//! Product catalog module.
//!
//! Contains the product, attribute, and price shapes of the catalog query
//! service, and the trait through which the catalog is fetched.

mod attribute;
mod product;

pub use attribute::{AttributeItem, AttributeKind, AttributeSet};
pub use product::{Catalog, CategoryFilter, Price, PriceCurrency, Product};

use crate::error::ServiceError;
use async_trait::async_trait;

/// The catalog query service: returns the full product list.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError>;

    /// Fetch the products wrapped in a [`Catalog`].
    async fn fetch_catalog(&self) -> Result<Catalog, ServiceError> {
        Ok(Catalog::new(self.fetch_products().await?))
    }
}
