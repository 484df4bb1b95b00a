//! Cart line items.

use crate::cart::SelectedOptions;
use crate::catalog::AttributeSet;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One cart entry: a product at a specific option configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product id.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price taken from the product's first price entry.
    pub unit_price: Money,
    /// Quantity; at least 1 once the item is in a cart.
    pub quantity: i64,
    /// First gallery image of the product.
    pub image: Option<String>,
    /// Chosen option per attribute name.
    pub selected_options: SelectedOptions,
    /// Attribute definitions copied from the catalog when the item was built.
    pub attributes: Vec<AttributeSet>,
}

/// Identity of a purchasable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationKey<'a> {
    pub product_id: &'a ProductId,
    pub selected_options: &'a SelectedOptions,
}

impl LineItem {
    /// Create a line item with quantity 1 and no attributes.
    pub fn new(product_id: ProductId, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity: 1,
            image: None,
            selected_options: SelectedOptions::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the selected options.
    pub fn with_options(mut self, selected_options: SelectedOptions) -> Self {
        self.selected_options = selected_options;
        self
    }

    /// Set the attribute snapshot.
    pub fn with_attributes(mut self, attributes: Vec<AttributeSet>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the display image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// The (product, options) pair that decides purchasable identity.
    pub fn configuration_key(&self) -> ConfigurationKey<'_> {
        ConfigurationKey {
            product_id: &self.product_id,
            selected_options: &self.selected_options,
        }
    }

    /// Check whether two items are the same purchasable configuration.
    pub fn same_configuration(&self, other: &LineItem) -> bool {
        self.configuration_key() == other.configuration_key()
    }

    /// Line subtotal (unit_price * quantity).
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn item(size: &str) -> LineItem {
        LineItem::new(
            ProductId::new("huarache"),
            "Nike Air Huarache Le",
            Money::new(14469, Currency::USD),
        )
        .with_options(SelectedOptions::new().with("Size", size))
    }

    #[test]
    fn test_same_configuration() {
        assert!(item("40").same_configuration(&item("40")));
        assert!(!item("40").same_configuration(&item("41")));

        let mut other_product = item("40");
        other_product.product_id = ProductId::new("jacket");
        assert!(!item("40").same_configuration(&other_product));
    }

    #[test]
    fn test_same_configuration_ignores_other_fields() {
        let a = item("40").with_quantity(3).with_image("a.jpg");
        let mut b = item("40");
        b.unit_price = Money::new(1, Currency::USD);
        assert!(a.same_configuration(&b));
    }

    #[test]
    fn test_subtotal() {
        let line = item("40").with_quantity(2);
        assert_eq!(line.subtotal().unwrap().amount_cents, 28938);
    }
}
