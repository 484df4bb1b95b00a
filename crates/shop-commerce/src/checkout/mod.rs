//! Checkout module.
//!
//! Contains order requests, the order channel, and the concurrent submitter.

mod order;
mod submitter;

pub use order::{CreateOrderRequest, LineResult, OrderOutcome, SubmissionReport};
pub use submitter::{OrderChannel, OrderSubmitter};
