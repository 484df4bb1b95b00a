//! Selected attribute options of a line item.

use serde::{Deserialize, Serialize};

/// One chosen option: attribute name to option value (not the option id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OptionChoice {
    /// Attribute name (e.g., "Size", "Color").
    pub name: String,
    /// Chosen option value (e.g., "40", "#44FF03").
    pub value: String,
}

impl OptionChoice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Mapping from attribute name to chosen option value.
///
/// Iteration follows insertion order: overwriting an attribute keeps its
/// position, a new attribute is appended. Order is visible only through
/// [`SelectedOptions::values`], which feeds the positional attribute list of
/// an order request. Equality ignores order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OptionChoice>", into = "Vec<OptionChoice>")]
pub struct SelectedOptions(Vec<OptionChoice>);

impl SelectedOptions {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set the value for an attribute, replacing any previous choice.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|c| c.name == name) {
            Some(choice) => choice.value = value,
            None => self.0.push(OptionChoice { name, value }),
        }
    }

    /// Builder-style variant of [`SelectedOptions::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get the chosen value for an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Check whether an attribute has a chosen value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes with a chosen value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the choices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionChoice> {
        self.0.iter()
    }

    /// Chosen values in insertion order.
    pub fn values(&self) -> Vec<String> {
        self.0.iter().map(|c| c.value.clone()).collect()
    }
}

impl PartialEq for SelectedOptions {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|c| other.get(&c.name) == Some(c.value.as_str()))
    }
}

impl Eq for SelectedOptions {}

impl<N, V> FromIterator<(N, V)> for SelectedOptions
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut options = SelectedOptions::new();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

impl FromIterator<OptionChoice> for SelectedOptions {
    fn from_iter<I: IntoIterator<Item = OptionChoice>>(iter: I) -> Self {
        iter.into_iter().map(|c| (c.name, c.value)).collect()
    }
}

/// Repeated attribute names collapse onto the first position, last value wins.
impl From<Vec<OptionChoice>> for SelectedOptions {
    fn from(choices: Vec<OptionChoice>) -> Self {
        choices.into_iter().collect()
    }
}

impl From<SelectedOptions> for Vec<OptionChoice> {
    fn from(options: SelectedOptions) -> Self {
        options.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = SelectedOptions::new().with("Size", "M").with("Color", "Green");
        let b = SelectedOptions::new().with("Color", "Green").with("Size", "M");
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_compares_values() {
        let a = SelectedOptions::new().with("Size", "M");
        let b = SelectedOptions::new().with("Size", "L");
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_requires_same_keys() {
        let a = SelectedOptions::new().with("Size", "M");
        let b = SelectedOptions::new().with("Size", "M").with("Color", "Blue");
        assert_ne!(a, b);
        assert_ne!(b, a);
        assert_eq!(SelectedOptions::new(), SelectedOptions::new());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut options = SelectedOptions::new()
            .with("Capacity", "256GB")
            .with("Color", "Black");
        options.insert("Capacity", "512GB");
        options.insert("With USB 3 ports", "Yes");

        assert_eq!(options.get("Capacity"), Some("512GB"));
        assert_eq!(options.values(), vec!["512GB", "Black", "Yes"]);
    }

    #[test]
    fn test_serializes_as_choice_list() {
        let options = SelectedOptions::new().with("Size", "S");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!([{ "name": "Size", "value": "S" }]));
    }

    #[test]
    fn test_deserialize_collapses_repeated_attributes() {
        let repeated: SelectedOptions = serde_json::from_value(serde_json::json!([
            { "name": "Size", "value": "S" },
            { "name": "Color", "value": "Red" },
            { "name": "Size", "value": "M" }
        ]))
        .unwrap();
        assert_eq!(repeated.len(), 2);
        assert_eq!(repeated.values(), vec!["M", "Red"]);

        let doubled: SelectedOptions = serde_json::from_value(serde_json::json!([
            { "name": "Size", "value": "M" },
            { "name": "Size", "value": "M" }
        ]))
        .unwrap();
        let single = SelectedOptions::new().with("Size", "M");
        let wider = SelectedOptions::new().with("Size", "M").with("Color", "Red");
        assert_eq!(doubled.len(), 1);
        assert_eq!(doubled, single);
        assert_eq!(single, doubled);
        assert_ne!(doubled, wider);
        assert_ne!(wider, doubled);
    }
}
