//! Product feed service

use crate::domain_models::Product;
use std::sync::Arc;
use storefront_http::{HttpError, HttpMethod, RequestOptions, ResourceClient, Transport};

/// Resource path of the product feed, relative to the API root
pub const PRODUCTS_RESOURCE: &str = "products.json";

/// Reads the product catalogue
#[derive(Debug, Clone)]
pub struct ProductService {
    resource: ResourceClient,
}

impl ProductService {
    pub fn new(transport: Arc<dyn Transport>, api_url: &str) -> Self {
        Self {
            resource: ResourceClient::new(transport, api_url, PRODUCTS_RESOURCE),
        }
    }

    /// Fetch every product (`GET {api_url}/products.json`, never with a body)
    pub async fn get_products(&self, options: RequestOptions) -> Result<Vec<Product>, HttpError> {
        let url = self.resource.build_url(&[]);
        let options = RequestOptions {
            body: None,
            ..options
        };
        self.resource.request(HttpMethod::Get, &url, options).await
    }
}
