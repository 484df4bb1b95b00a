//! GraphQL client for the storefront service.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shop_commerce::catalog::{CatalogQuery, Product};
use shop_commerce::checkout::{CreateOrderRequest, OrderChannel};
use shop_commerce::ServiceError;
use tracing::{debug, error, instrument};

use crate::graphql::{CreateOrderData, GraphqlRequest, GraphqlResponse, ProductsData};
use crate::{FetchError, HttpTransport, ReqwestTransport, RequestBuilder};

/// Client for the storefront GraphQL endpoint.
///
/// Serves both the catalog query and the order channel.
#[derive(Debug, Clone)]
pub struct GraphqlClient<T> {
    transport: T,
    endpoint: String,
    default_headers: HashMap<String, String>,
}

impl GraphqlClient<ReqwestTransport> {
    /// Client over HTTP with the given request timeout.
    pub fn http(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::new(ReqwestTransport::new().with_timeout(timeout), endpoint)
    }
}

impl<T: HttpTransport> GraphqlClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            default_headers: HashMap::new(),
        }
    }

    /// Add a header that will be included in every request.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add several default headers.
    pub fn with_default_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Post an operation and decode its `data`.
    ///
    /// A non-2xx status or a non-empty `errors` array is an error. Missing
    /// `data` is returned as `None`.
    pub async fn execute<D: DeserializeOwned>(
        &self,
        operation: &GraphqlRequest,
    ) -> Result<Option<D>, FetchError> {
        let request = RequestBuilder::post(self.endpoint.clone())
            .headers(self.default_headers.clone())
            .accept("application/json")
            .json(operation)?;

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            error!(
                status = response.status,
                operation = operation.operation_name.as_deref().unwrap_or(""),
                "service returned non-success status"
            );
        }
        let response = response.error_for_status()?;

        let envelope: GraphqlResponse<D> = response.json().map_err(|e| {
            error!(
                content_type = response.content_type().unwrap_or(""),
                error = %e,
                "failed to decode GraphQL response"
            );
            e
        })?;
        if !envelope.errors.is_empty() {
            debug!(errors = ?envelope.errors, "GraphQL errors in response");
        }
        envelope.into_result()
    }

    /// Fetch the product list.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn products(&self) -> Result<Vec<Product>, FetchError> {
        let data: ProductsData = self
            .execute(&GraphqlRequest::products())
            .await?
            .ok_or(FetchError::MissingData)?;
        debug!(count = data.products.len(), "fetched products");
        Ok(data.products)
    }

    /// Create one order line. A null or absent result counts as success.
    #[instrument(skip(self, request), fields(product_id = %request.product_id, quantity = request.quantity))]
    pub async fn create_order_line(&self, request: &CreateOrderRequest) -> Result<(), FetchError> {
        let data: Option<CreateOrderData> =
            self.execute(&GraphqlRequest::create_order(request)?).await?;
        debug!(
            result = ?data.and_then(|d| d.create_order),
            "order line created"
        );
        Ok(())
    }
}

#[async_trait]
impl<T: HttpTransport> CatalogQuery for GraphqlClient<T> {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products().await?)
    }
}

#[async_trait]
impl<T: HttpTransport> OrderChannel for GraphqlClient<T> {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<(), ServiceError> {
        Ok(self.create_order_line(request).await?)
    }
}
