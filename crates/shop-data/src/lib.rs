//! GraphQL service client for the storefront.
//!
//! Implements the catalog query and the order channel of `shop-commerce`
//! over HTTP, with the transport behind a trait so it can be swapped out.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use shop_commerce::prelude::*;
//! use shop_data::GraphqlClient;
//!
//! let client = GraphqlClient::http("http://localhost:8000/graphql", Duration::from_secs(10));
//! let catalog = client.fetch_catalog().await?;
//!
//! let mut session = ShopSession::new(Currency::USD, client);
//! let tee = catalog.require(&ProductId::new("tee"))?;
//! session.cart_mut().add(tee.line_item(tee.default_options())?)?;
//! let outcome = session.place_order().await?;
//! ```

mod client;
mod error;
pub mod graphql;
mod request;
mod response;
mod transport;

pub use client::GraphqlClient;
pub use error::FetchError;
pub use graphql::{GraphqlError, GraphqlRequest, GraphqlResponse};
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{HttpTransport, ReqwestTransport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, GraphqlClient, HttpTransport, ReqwestTransport, Response};
}
