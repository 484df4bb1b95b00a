//! Product attribute definitions and their selectable options.

use serde::{Deserialize, Serialize};

/// Rendering treatment of an attribute.
///
/// Carried through to the cart for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Color swatch; option values are CSS colors.
    Swatch,
    /// Textual label.
    #[default]
    #[serde(other)]
    Text,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Swatch => "swatch",
            AttributeKind::Text => "text",
        }
    }
}

/// A selectable value for one attribute (e.g., a color swatch or size label).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeItem {
    pub id: String,
    /// Human-readable label ("Green", "Extra Large").
    pub display_value: String,
    /// Value stored in a selection ("#44FF03", "XL").
    pub value: String,
}

impl AttributeItem {
    pub fn new(
        id: impl Into<String>,
        display_value: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_value: display_value.into(),
            value: value.into(),
        }
    }
}

/// An attribute definition with its options, owned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeSet {
    pub id: String,
    /// Attribute name; the key used in selected options.
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AttributeKind,
    /// Options in catalog order.
    #[serde(default)]
    pub items: Vec<AttributeItem>,
}

impl AttributeSet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            items: Vec::new(),
        }
    }

    /// Append an option.
    pub fn with_item(mut self, item: AttributeItem) -> Self {
        self.items.push(item);
        self
    }

    /// Find an option by its value.
    pub fn item_by_value(&self, value: &str) -> Option<&AttributeItem> {
        self.items.iter().find(|i| i.value == value)
    }

    /// The first option, used when nothing was chosen explicitly.
    pub fn default_item(&self) -> Option<&AttributeItem> {
        self.items.first()
    }

    pub fn is_swatch(&self) -> bool {
        self.kind == AttributeKind::Swatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_catalog_shape() {
        let json = serde_json::json!({
            "id": "Color",
            "name": "Color",
            "type": "swatch",
            "items": [
                { "id": "Green", "displayValue": "Green", "value": "#44FF03" },
                { "id": "Cyan", "displayValue": "Cyan", "value": "#03FFF7" }
            ]
        });
        let set: AttributeSet = serde_json::from_value(json).unwrap();
        assert!(set.is_swatch());
        assert_eq!(set.items.len(), 2);
        assert_eq!(set.item_by_value("#03FFF7").unwrap().display_value, "Cyan");
        assert_eq!(set.default_item().unwrap().value, "#44FF03");
    }

    #[test]
    fn test_unknown_kind_is_text() {
        let json = serde_json::json!({ "id": "Size", "name": "Size", "type": "dropdown", "items": [] });
        let set: AttributeSet = serde_json::from_value(json).unwrap();
        assert_eq!(set.kind, AttributeKind::Text);
    }
}
