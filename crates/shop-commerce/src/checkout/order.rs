//! Order requests and submission outcomes.

use crate::cart::LineItem;
use crate::error::ServiceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One order-creation call: a single cart line.
///
/// Field names match the variables of the `createOrder` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Selected option values, positional, in the line's selection order.
    #[serde(rename = "attributes")]
    pub attribute_values: Vec<String>,
}

impl CreateOrderRequest {
    /// Derive the request for a cart line.
    ///
    /// Attribute values are not keyed by attribute; the receiving service
    /// sees only their order.
    pub fn from_line_item(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            attribute_values: item.selected_options.values(),
        }
    }
}

impl From<&LineItem> for CreateOrderRequest {
    fn from(item: &LineItem) -> Self {
        Self::from_line_item(item)
    }
}

/// Aggregate result of submitting a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderOutcome {
    /// Every line was accepted.
    Success,
    /// At least one line was rejected. Other lines may still have been created.
    Failure,
}

impl OrderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OrderOutcome::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderOutcome::Success => "success",
            OrderOutcome::Failure => "failure",
        }
    }

    /// Message shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            OrderOutcome::Success => "Order placed successfully!",
            OrderOutcome::Failure => "Failed to place order.",
        }
    }
}

/// Settled result of one order-creation call.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    pub request: CreateOrderRequest,
    pub result: Result<(), ServiceError>,
}

impl LineResult {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-line results of a submission, in cart order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionReport {
    pub lines: Vec<LineResult>,
}

impl SubmissionReport {
    /// Success only if every line succeeded (vacuously true for no lines).
    pub fn outcome(&self) -> OrderOutcome {
        if self.lines.iter().all(LineResult::is_success) {
            OrderOutcome::Success
        } else {
            OrderOutcome::Failure
        }
    }

    /// Number of requests issued.
    pub fn submitted(&self) -> usize {
        self.lines.len()
    }

    /// Number of requests that succeeded.
    pub fn succeeded(&self) -> usize {
        self.lines.iter().filter(|l| l.is_success()).count()
    }

    /// Number of requests that failed.
    pub fn failed(&self) -> usize {
        self.submitted() - self.succeeded()
    }
}
