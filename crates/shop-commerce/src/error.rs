//! Commerce error types.

use thiserror::Error;

/// Errors raised by cart and catalog operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A positional cart operation was given an index past the end.
    #[error("Cart index {index} out of bounds (cart has {len} items)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product cannot be added because it is out of stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// Not every attribute of the product has a selected option.
    #[error("Missing option selection for: {}", .0.join(", "))]
    IncompleteSelection(Vec<String>),

    /// The product has no such attribute.
    #[error("Unknown attribute {attribute} on product {product_id}")]
    UnknownAttribute {
        product_id: String,
        attribute: String,
    },

    /// The attribute has no option with this value.
    #[error("Unknown option {value} for attribute {attribute}")]
    UnknownOption { attribute: String, value: String },

    /// The product has no price entry.
    #[error("Product has no price: {0}")]
    MissingPrice(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// An order was requested for an empty cart.
    #[error("Cannot place an order for an empty cart")]
    EmptyCart,
}

/// Failure reported by an external collaborator (catalog query or order channel).
///
/// The core only distinguishes "settled successfully" from "did not"; the
/// variants exist for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never reached the service or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with an error.
    #[error("Service rejected request: {0}")]
    Rejected(String),

    /// The service answered with a payload that could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}
