//! Catalog products as returned by the catalog query service.

use crate::cart::{LineItem, SelectedOptions};
use crate::catalog::AttributeSet;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency attached to a catalog price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceCurrency {
    /// Currency code ("USD").
    pub label: String,
    /// Display symbol ("$").
    pub symbol: String,
}

/// A catalog price entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<PriceCurrency>,
}

impl Price {
    /// Resolve the currency from its label, then its symbol, defaulting to USD.
    pub fn resolved_currency(&self) -> Currency {
        self.currency
            .as_ref()
            .and_then(|c| Currency::from_code(&c.label).or_else(|| Currency::from_symbol(&c.symbol)))
            .unwrap_or_default()
    }

    /// Convert to integer money.
    pub fn money(&self) -> Money {
        Money::from_decimal(self.amount, self.resolved_currency())
    }

    /// Display string using the catalog's own symbol.
    pub fn display(&self) -> String {
        match &self.currency {
            Some(currency) => format!("{}{:.2}", currency.symbol, self.amount),
            None => "Price not available".to_string(),
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub in_stock: bool,
    /// Image URLs; the first one is the primary image.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Description markup.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSet>,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Product {
    /// Create an in-stock product with no attributes or prices.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            in_stock: true,
            gallery: Vec::new(),
            description: String::new(),
            category: String::new(),
            brand: String::new(),
            attributes: Vec::new(),
            prices: Vec::new(),
        }
    }

    /// The price shown and charged (`prices[0]`).
    pub fn primary_price(&self) -> Option<&Price> {
        self.prices.first()
    }

    /// The primary image (`gallery[0]`).
    pub fn primary_image(&self) -> Option<&str> {
        self.gallery.first().map(String::as_str)
    }

    /// Find an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeSet> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Quick-add selection: the first option of every attribute.
    pub fn default_options(&self) -> SelectedOptions {
        self.attributes
            .iter()
            .filter_map(|a| a.default_item().map(|i| (a.name.clone(), i.value.clone())))
            .collect()
    }

    /// Attribute names that have no entry in `selected`.
    pub fn missing_selections(&self, selected: &SelectedOptions) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|a| !selected.contains(&a.name))
            .map(|a| a.name.clone())
            .collect()
    }

    /// Check whether every attribute has a chosen value.
    pub fn is_fully_configured(&self, selected: &SelectedOptions) -> bool {
        self.attributes.iter().all(|a| selected.contains(&a.name))
    }

    /// Record a choice after checking the attribute and option exist.
    pub fn select(
        &self,
        selected: &mut SelectedOptions,
        attribute_name: &str,
        value: &str,
    ) -> Result<(), CommerceError> {
        let attribute = self
            .attribute(attribute_name)
            .ok_or_else(|| CommerceError::UnknownAttribute {
                product_id: self.id.to_string(),
                attribute: attribute_name.to_string(),
            })?;
        if attribute.item_by_value(value).is_none() {
            return Err(CommerceError::UnknownOption {
                attribute: attribute_name.to_string(),
                value: value.to_string(),
            });
        }
        selected.insert(attribute_name, value);
        Ok(())
    }

    /// Build a quantity-1 line item for this product.
    ///
    /// The attribute definitions are copied into the item.
    pub fn line_item(&self, selected: SelectedOptions) -> Result<LineItem, CommerceError> {
        if !self.in_stock {
            return Err(CommerceError::OutOfStock(self.id.to_string()));
        }
        let missing = self.missing_selections(&selected);
        if !missing.is_empty() {
            return Err(CommerceError::IncompleteSelection(missing));
        }
        let price = self
            .primary_price()
            .ok_or_else(|| CommerceError::MissingPrice(self.id.to_string()))?;

        let mut item = LineItem::new(self.id.clone(), self.name.clone(), price.money())
            .with_options(selected)
            .with_attributes(self.attributes.clone());
        item.image = self.primary_image().map(str::to_string);
        Ok(item)
    }

    /// Stable element id: `product-` followed by the kebab-cased name.
    pub fn test_id(&self) -> String {
        let kebab = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        format!("product-{}", kebab)
    }
}

/// Category selection for product listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category equals the name.
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => &product.category == name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Named(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Named(name) => write!(f, "{}", name),
        }
    }
}

/// The product list fetched from the catalog query service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in service order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Like [`Catalog::find`] but reports a missing product as an error.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products matching a category filter, in service order.
    pub fn in_category<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Distinct category names in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !product.category.is_empty() && !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}
