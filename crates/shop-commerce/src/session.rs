//! The top-level shopping session.

use tracing::info;

use crate::cart::{Cart, CartStore};
use crate::checkout::{OrderChannel, OrderOutcome, OrderSubmitter, SubmissionReport};
use crate::error::CommerceError;
use crate::money::Currency;

/// One shopper's session: owns the cart and the submitter for its orders.
///
/// The presentation layer holds the session and passes it by reference to
/// whatever needs the cart.
#[derive(Debug)]
pub struct ShopSession<C> {
    store: CartStore,
    submitter: OrderSubmitter<C>,
}

impl<C: OrderChannel> ShopSession<C> {
    /// Start a session with an empty cart.
    pub fn new(currency: Currency, channel: C) -> Self {
        Self {
            store: CartStore::new(currency),
            submitter: OrderSubmitter::new(channel),
        }
    }

    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.store
    }

    pub fn submitter(&self) -> &OrderSubmitter<C> {
        &self.submitter
    }

    /// Place an order for the current cart.
    ///
    /// An empty cart is refused. The cart is cleared only when every line
    /// succeeded; on failure it is kept so the shopper can retry.
    pub async fn place_order(&mut self) -> Result<OrderOutcome, CommerceError> {
        Ok(self.place_order_detailed().await?.outcome())
    }

    /// [`ShopSession::place_order`] keeping the per-line results.
    pub async fn place_order_detailed(&mut self) -> Result<SubmissionReport, CommerceError> {
        if self.store.cart().is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let report = self.submitter.submit_detailed(self.store.cart()).await;
        if report.outcome().is_success() {
            self.store.clear();
            info!("order placed, cart cleared");
        }
        Ok(report)
    }
}
