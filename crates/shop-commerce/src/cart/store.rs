//! Cart state and the store that mutates it.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::ids::CartId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopper's cart: line items in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Currency every line item is priced in.
    pub currency: Currency,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            currency,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of `unit_price * quantity` over all items.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let subtotals = self
            .items
            .iter()
            .map(LineItem::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(other) = subtotals.iter().find(|m| m.currency != self.currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Money::try_sum(subtotals.iter(), self.currency).ok_or(CommerceError::Overflow)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line item at a position.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, CommerceError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CommerceError::IndexOutOfBounds { index, len })
    }

    fn check_index(&self, index: usize) -> Result<(), CommerceError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CommerceError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Owner of a single cart.
///
/// Positions are 0-based indices into the current item order. They are not
/// stable across removals; callers must use the most recently observed state.
/// Every failing call leaves the cart unchanged.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Cart,
}

impl CartStore {
    /// Create a store holding an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            cart: Cart::new(currency),
        }
    }

    /// Current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add an item, merging it into an existing line with the same configuration.
    ///
    /// On a merge the existing quantity grows by one and every other field of
    /// `item` is discarded. Otherwise the item is appended; a quantity of 0
    /// is treated as unset and becomes 1.
    pub fn add(&mut self, mut item: LineItem) -> Result<&Cart, CommerceError> {
        if item.quantity < 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.quantity == 0 {
            item.quantity = 1;
        }
        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let existing = self
            .cart
            .items
            .iter()
            .position(|i| i.same_configuration(&item));

        match existing {
            Some(index) => {
                let line = self.cart.item_mut(index)?;
                line.quantity = bump(line.quantity)?;
                debug!(
                    product_id = %line.product_id,
                    index,
                    quantity = line.quantity,
                    "merged into existing cart line"
                );
            }
            None => {
                if item.unit_price.currency != self.cart.currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: self.cart.currency.code().to_string(),
                        got: item.unit_price.currency.code().to_string(),
                    });
                }
                debug!(
                    product_id = %item.product_id,
                    index = self.cart.items.len(),
                    quantity = item.quantity,
                    "appended cart line"
                );
                self.cart.items.push(item);
            }
        }

        Ok(self.touch())
    }

    /// Increase the quantity at `index` by one.
    pub fn increase_quantity(&mut self, index: usize) -> Result<&Cart, CommerceError> {
        let line = self.cart.item_mut(index)?;
        line.quantity = bump(line.quantity)?;
        debug!(index, quantity = line.quantity, "increased cart line quantity");
        Ok(self.touch())
    }

    /// Decrease the quantity at `index` by one, removing the line at zero.
    ///
    /// Removal shifts every later line down by one position.
    pub fn decrease_quantity(&mut self, index: usize) -> Result<&Cart, CommerceError> {
        let quantity = self.cart.item_mut(index)?.quantity;
        if quantity <= 1 {
            let removed = self.cart.items.remove(index);
            debug!(product_id = %removed.product_id, index, "removed cart line at zero quantity");
        } else {
            self.cart.items[index].quantity = quantity - 1;
            debug!(index, quantity = quantity - 1, "decreased cart line quantity");
        }
        Ok(self.touch())
    }

    /// Remove the line at `index` regardless of its quantity.
    pub fn delete_item(&mut self, index: usize) -> Result<&Cart, CommerceError> {
        self.cart.check_index(index)?;
        let removed = self.cart.items.remove(index);
        debug!(product_id = %removed.product_id, index, "deleted cart line");
        Ok(self.touch())
    }

    /// Set the chosen option for one attribute of the line at `index`.
    ///
    /// Other attributes and the line's position are untouched. The line is
    /// not re-merged, so two lines may end up with the same configuration.
    pub fn update_selected_option(
        &mut self,
        index: usize,
        attribute_name: impl Into<String>,
        option_value: impl Into<String>,
    ) -> Result<&Cart, CommerceError> {
        let attribute_name = attribute_name.into();
        let option_value = option_value.into();
        let line = self.cart.item_mut(index)?;
        debug!(
            index,
            attribute = %attribute_name,
            value = %option_value,
            "updated cart line option"
        );
        line.selected_options.insert(attribute_name, option_value);
        Ok(self.touch())
    }

    /// Sum of `unit_price * quantity`, computed from the current lines.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    /// Sum of all quantities, computed from the current lines.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Remove every line.
    pub fn clear(&mut self) -> &Cart {
        let removed = self.cart.items.len();
        self.cart.items.clear();
        debug!(removed, "cleared cart");
        self.touch()
    }

    fn touch(&mut self) -> &Cart {
        self.cart.updated_at = current_timestamp();
        &self.cart
    }
}

/// Add one to a quantity, enforcing the per-line maximum.
fn bump(quantity: i64) -> Result<i64, CommerceError> {
    let next = quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
    if next > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            next,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(next)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::SelectedOptions;
    use crate::ids::ProductId;

    fn line(product: &str, size: &str, cents: i64) -> LineItem {
        LineItem::new(
            ProductId::new(product),
            product.to_uppercase(),
            Money::new(cents, Currency::USD),
        )
        .with_options(SelectedOptions::new().with("Size", size))
    }

    fn summary(cart: &Cart) -> Vec<(String, String, i64)> {
        cart.items
            .iter()
            .map(|i| {
                (
                    i.product_id.to_string(),
                    i.selected_options.get("Size").unwrap_or_default().to_string(),
                    i.quantity,
                )
            })
            .collect()
    }

    #[test]
    fn test_add_merges_same_configuration() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 1000)).unwrap();
        store.add(line("a", "L", 1000)).unwrap();
        let cart = store.add(line("a", "M", 1000)).unwrap();

        assert_eq!(
            summary(cart),
            vec![
                ("a".to_string(), "M".to_string(), 2),
                ("a".to_string(), "L".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_merge_ignores_option_order_and_incoming_fields() {
        let mut store = CartStore::default();
        let first = LineItem::new(ProductId::new("imac"), "iMac", Money::new(168800, Currency::USD))
            .with_options(
                SelectedOptions::new()
                    .with("Capacity", "256GB")
                    .with("With USB 3 ports", "Yes"),
            );
        let second = LineItem::new(ProductId::new("imac"), "renamed", Money::new(1, Currency::USD))
            .with_options(
                SelectedOptions::new()
                    .with("With USB 3 ports", "Yes")
                    .with("Capacity", "256GB"),
            )
            .with_quantity(5);

        store.add(first).unwrap();
        let cart = store.add(second).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].name, "iMac");
        assert_eq!(cart.items[0].unit_price.amount_cents, 168800);
    }

    #[test]
    fn test_add_many_times_counts_adds() {
        let mut store = CartStore::default();
        for _ in 0..5 {
            store.add(line("ps-5", "-", 84402)).unwrap();
        }
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.item_count(), 5);
    }

    #[test]
    fn test_add_defaults_unset_quantity() {
        let mut store = CartStore::default();
        let cart = store.add(line("a", "M", 100).with_quantity(0)).unwrap();
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_add_keeps_explicit_quantity() {
        let mut store = CartStore::default();
        let cart = store.add(line("a", "M", 100).with_quantity(3)).unwrap();
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_add_rejects_negative_quantity() {
        let mut store = CartStore::default();
        let err = store.add(line("a", "M", 100).with_quantity(-1)).unwrap_err();
        assert_eq!(err, CommerceError::InvalidQuantity(-1));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_rejects_other_currency() {
        let mut store = CartStore::new(Currency::USD);
        let mut item = line("a", "M", 100);
        item.unit_price = Money::new(100, Currency::EUR);
        assert!(matches!(
            store.add(item),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_distinct_options_stay_distinct() {
        let mut store = CartStore::default();
        store.add(line("a", "S", 100)).unwrap();
        store.add(line("a", "M", 100)).unwrap();
        store.add(line("b", "S", 100)).unwrap();
        assert_eq!(store.cart().len(), 3);
    }

    #[test]
    fn test_increase_quantity() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100)).unwrap();
        let cart = store.increase_quantity(0).unwrap();
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_increase_quantity_limit() {
        let mut store = CartStore::default();
        store
            .add(line("a", "M", 100).with_quantity(MAX_QUANTITY_PER_ITEM))
            .unwrap();
        assert!(matches!(
            store.increase_quantity(0),
            Err(CommerceError::QuantityExceedsLimit(_, _))
        ));
        assert_eq!(store.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_decrease_to_zero_removes_and_shifts() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100)).unwrap();
        store.add(line("a", "L", 100)).unwrap();
        store.add(line("b", "S", 100)).unwrap();

        let cart = store.decrease_quantity(0).unwrap();
        assert_eq!(
            summary(cart),
            vec![
                ("a".to_string(), "L".to_string(), 1),
                ("b".to_string(), "S".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_decrease_above_one_keeps_line() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100).with_quantity(3)).unwrap();
        let cart = store.decrease_quantity(0).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_delete_item() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100).with_quantity(4)).unwrap();
        store.add(line("b", "M", 100)).unwrap();
        let cart = store.delete_item(0).unwrap();
        assert_eq!(summary(cart), vec![("b".to_string(), "M".to_string(), 1)]);
    }

    #[test]
    fn test_index_errors_leave_cart_untouched() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100)).unwrap();
        let before = store.cart().items.clone();

        let expected = CommerceError::IndexOutOfBounds { index: 1, len: 1 };
        assert_eq!(store.increase_quantity(1).unwrap_err(), expected);
        assert_eq!(store.decrease_quantity(1).unwrap_err(), expected);
        assert_eq!(store.delete_item(1).unwrap_err(), expected);
        assert_eq!(
            store.update_selected_option(1, "Size", "L").unwrap_err(),
            expected
        );
        assert_eq!(store.cart().items, before);
    }

    #[test]
    fn test_update_selected_option_does_not_merge() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100)).unwrap();
        store.add(line("a", "L", 100)).unwrap();

        let cart = store.update_selected_option(1, "Size", "M").unwrap();
        assert_eq!(cart.len(), 2);
        assert!(cart.items[0].same_configuration(&cart.items[1]));

        // A fresh add merges into the first matching line only.
        let cart = store.add(line("a", "M", 100)).unwrap();
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].quantity, 1);
    }

    #[test]
    fn test_update_selected_option_inserts_missing_attribute() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 100)).unwrap();
        let cart = store.update_selected_option(0, "Color", "Blue").unwrap();
        let options = &cart.items[0].selected_options;
        assert_eq!(options.get("Size"), Some("M"));
        assert_eq!(options.get("Color"), Some("Blue"));
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 1000)).unwrap();
        store.add(line("b", "M", 2550)).unwrap();
        assert_eq!(store.total().unwrap().amount_cents, 3550);

        store.increase_quantity(1).unwrap();
        assert_eq!(store.total().unwrap().amount_cents, 6100);

        store.decrease_quantity(0).unwrap();
        assert_eq!(store.total().unwrap().amount_cents, 5100);
        assert_eq!(store.item_count(), 2);

        store.clear();
        assert!(store.total().unwrap().is_zero());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_total_overflow_is_reported() {
        let mut store = CartStore::default();
        store
            .add(line("a", "M", i64::MAX / 2).with_quantity(3))
            .unwrap();
        assert_eq!(store.total().unwrap_err(), CommerceError::Overflow);
    }

    #[test]
    fn test_total_overflow_across_lines() {
        let mut store = CartStore::default();
        store.add(line("a", "M", i64::MAX / 2 + 1)).unwrap();
        store.add(line("a", "L", i64::MAX / 2 + 1)).unwrap();
        assert_eq!(store.total().unwrap_err(), CommerceError::Overflow);
    }

    #[test]
    fn test_deserialized_line_with_repeated_option_merges() {
        let mut store = CartStore::default();
        store.add(line("a", "M", 1000)).unwrap();

        let mut json = serde_json::to_value(line("a", "M", 1000)).unwrap();
        json["selectedOptions"] = serde_json::json!([
            { "name": "Size", "value": "M" },
            { "name": "Size", "value": "M" }
        ]);
        let repeated: LineItem = serde_json::from_value(json).unwrap();
        let cart = store.add(repeated).unwrap();

        assert_eq!(summary(cart), vec![("a".to_string(), "M".to_string(), 2)]);
    }
}
