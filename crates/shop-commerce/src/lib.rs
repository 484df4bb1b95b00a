//! Cart aggregation and order submission for the storefront client.
//!
//! - **Catalog**: Products, attributes, prices, and the catalog query seam
//! - **Cart**: Line items keyed by product and selected options, running totals
//! - **Checkout**: Concurrent order submission through an order channel
//! - **Session**: The context that owns one shopper's cart
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let mut store = CartStore::new(Currency::USD);
//! let shirt = LineItem::new(ProductId::new("shirt"), "Shirt", Money::new(2500, Currency::USD))
//!     .with_options(SelectedOptions::new().with("Size", "M"));
//!
//! store.add(shirt.clone()).unwrap();
//! store.add(shirt).unwrap();
//!
//! assert_eq!(store.cart().len(), 1);
//! assert_eq!(store.item_count(), 2);
//! assert_eq!(store.total().unwrap().display(), "$50.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use error::{CommerceError, ServiceError};
pub use ids::*;
pub use money::{Currency, Money};
pub use session::ShopSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ServiceError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AttributeItem, AttributeKind, AttributeSet, Catalog, CatalogQuery, CategoryFilter, Price,
        PriceCurrency, Product,
    };

    // Cart
    pub use crate::cart::{Cart, CartStore, LineItem, OptionChoice, SelectedOptions};

    // Checkout
    pub use crate::checkout::{
        CreateOrderRequest, OrderChannel, OrderOutcome, OrderSubmitter, SubmissionReport,
    };

    pub use crate::session::ShopSession;
}
