//! Shopping cart module.
//!
//! Contains the selected-option model, line items, and the cart store.

mod line_item;
mod options;
mod store;

pub use line_item::{ConfigurationKey, LineItem};
pub use options::{OptionChoice, SelectedOptions};
pub use store::{Cart, CartStore, MAX_QUANTITY_PER_ITEM};
