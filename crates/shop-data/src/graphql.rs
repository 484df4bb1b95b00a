//! GraphQL request and response envelopes, and the storefront documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shop_commerce::catalog::Product;
use shop_commerce::checkout::CreateOrderRequest;

use crate::FetchError;

/// Fetches every product with its attributes and prices.
pub const PRODUCTS_QUERY: &str = r#"query GET_PRODUCTS {
  products {
    id
    name
    inStock
    gallery
    description
    category
    brand
    attributes {
      id
      name
      type
      items {
        id
        displayValue
        value
      }
    }
    prices {
      amount
      currency {
        label
        symbol
      }
    }
  }
}"#;

/// Creates one order line. The service returns a scalar.
pub const CREATE_ORDER_MUTATION: &str = r#"mutation createOrder($productId: ID!, $quantity: Int!, $attributes: [String!]!) {
  createOrder(productId: $productId, quantity: $quantity, attributes: $attributes)
}"#;

/// A GraphQL operation as posted to the endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub variables: serde_json::Value,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: serde_json::Value::Null,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables<V: Serialize>(mut self, variables: &V) -> Result<Self, FetchError> {
        self.variables = serde_json::to_value(variables)?;
        Ok(self)
    }

    /// The products query.
    pub fn products() -> Self {
        Self::new(PRODUCTS_QUERY).with_operation_name("GET_PRODUCTS")
    }

    /// The createOrder mutation for one order line.
    pub fn create_order(request: &CreateOrderRequest) -> Result<Self, FetchError> {
        Self::new(CREATE_ORDER_MUTATION)
            .with_operation_name("createOrder")
            .with_variables(request)
    }
}

/// A single entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// The response envelope: `data`, `errors`, or both.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GraphqlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T: DeserializeOwned> GraphqlResponse<T> {
    /// Fail if the service reported any error; otherwise hand back `data`.
    pub fn into_result(self) -> Result<Option<T>, FetchError> {
        if !self.errors.is_empty() {
            return Err(FetchError::GraphqlErrors(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        Ok(self.data)
    }
}

/// `data` of the products query.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// `data` of the createOrder mutation. The scalar result may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderData {
    #[serde(rename = "createOrder", default)]
    pub create_order: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::ids::ProductId;

    #[test]
    fn test_create_order_variables() {
        let request = CreateOrderRequest {
            product_id: ProductId::new("apple-airtag"),
            quantity: 2,
            attribute_values: vec![],
        };
        let body = serde_json::to_value(GraphqlRequest::create_order(&request).unwrap()).unwrap();
        assert_eq!(body["operationName"], "createOrder");
        assert_eq!(
            body["variables"],
            serde_json::json!({ "productId": "apple-airtag", "quantity": 2, "attributes": [] })
        );
    }

    #[test]
    fn test_products_query_has_no_variables() {
        let body = serde_json::to_value(GraphqlRequest::products()).unwrap();
        assert!(body.get("variables").is_none());
        assert!(body["query"].as_str().unwrap().contains("inStock"));
    }

    #[test]
    fn test_errors_take_precedence_over_data() {
        let response: GraphqlResponse<CreateOrderData> = serde_json::from_value(serde_json::json!({
            "data": { "createOrder": null },
            "errors": [{ "message": "Product not found" }]
        }))
        .unwrap();
        match response.into_result() {
            Err(FetchError::GraphqlErrors(messages)) => assert_eq!(messages, vec!["Product not found"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_null_mutation_result_is_data() {
        let response: GraphqlResponse<CreateOrderData> =
            serde_json::from_value(serde_json::json!({ "data": { "createOrder": null } })).unwrap();
        let data = response.into_result().unwrap().unwrap();
        assert!(data.create_order.is_none());
    }
}
