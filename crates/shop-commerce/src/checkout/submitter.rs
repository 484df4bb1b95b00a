//! Concurrent order submission.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::cart::Cart;
use crate::checkout::{CreateOrderRequest, LineResult, OrderOutcome, SubmissionReport};
use crate::error::ServiceError;

/// The order submission channel: accepts one line per call.
///
/// Transport, retries, timeouts and authentication belong to the implementor.
#[async_trait]
pub trait OrderChannel: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<(), ServiceError>;
}

#[async_trait]
impl<T: OrderChannel + ?Sized> OrderChannel for Arc<T> {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<(), ServiceError> {
        (**self).create_order(request).await
    }
}

/// Submits a cart as one order-creation call per line.
///
/// All calls are issued together and every one is awaited until it settles;
/// a rejection does not cancel its siblings. Nothing is rolled back: a
/// [`OrderOutcome::Failure`] can leave some lines created on the service,
/// and resubmitting the same cart sends those lines again.
#[derive(Debug, Clone)]
pub struct OrderSubmitter<C> {
    channel: C,
}

impl<C: OrderChannel> OrderSubmitter<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// The underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Submit every line and report only the aggregate outcome.
    pub async fn submit(&self, cart: &Cart) -> OrderOutcome {
        self.submit_detailed(cart).await.outcome()
    }

    /// Submit every line and keep the settled result of each.
    #[instrument(skip(self, cart), fields(cart_id = %cart.id, lines = cart.len()))]
    pub async fn submit_detailed(&self, cart: &Cart) -> SubmissionReport {
        let requests: Vec<CreateOrderRequest> = cart
            .items
            .iter()
            .map(CreateOrderRequest::from_line_item)
            .collect();

        let results = join_all(
            requests
                .iter()
                .map(|request| self.channel.create_order(request)),
        )
        .await;

        let lines: Vec<LineResult> = requests
            .into_iter()
            .zip(results)
            .map(|(request, result)| LineResult { request, result })
            .collect();

        for line in lines.iter().filter(|l| !l.is_success()) {
            if let Err(error) = &line.result {
                warn!(
                    product_id = %line.request.product_id,
                    quantity = line.request.quantity,
                    %error,
                    "order line rejected"
                );
            }
        }

        let report = SubmissionReport { lines };
        info!(
            submitted = report.submitted(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            outcome = report.outcome().as_str(),
            "order submission settled"
        );
        report
    }
}
