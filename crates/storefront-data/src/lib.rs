//! Data fetching for the headless storefront.
//!
//! Provides a request builder over a pluggable [`Transport`], a GraphQL
//! client for the CMS, the catalog queries the storefront pages issue,
//! and a client for the commerce Store API.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{CatalogService, GraphqlClient};
//!
//! let client = GraphqlClient::new("https://cms.example/graphql");
//! let catalog = CatalogService::new(client);
//!
//! // Failures are logged and yield an empty page
//! let page = catalog.flash_sale_products(8);
//! for product in &page.nodes {
//!     println!("{}", product.name);
//! }
//! ```

mod catalog;
mod error;
mod graphql;
pub mod queries;
mod request;
mod response;
mod retry;
mod store_api;
mod transport;

pub use catalog::CatalogService;
pub use error::FetchError;
pub use graphql::{GraphqlClient, QueryProvider};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use store_api::{
    AddToCartRequest, ProductQuery, StoreApiClient, VariationSelection, DEFAULT_STORE_API_PATH,
};
pub use transport::{CannedTransport, HttpTransport, Transport};

use std::collections::HashMap;

/// HTTP client for making outbound requests.
///
/// Holds a base URL and default headers, and hands finished requests to
/// its transport.
#[derive(Debug, Clone)]
pub struct FetchClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for FetchClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient<HttpTransport> {
    /// Create a client over the network transport.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl<T: Transport> FetchClient<T> {
    /// Create a client over the given transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Put, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Patch, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let builder = RequestBuilder::new(method, full_url).headers(
            self.default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T: Transport> {
    client: &'a FetchClient<T>,
    builder: RequestBuilder,
}

impl<'a, T: Transport> ClientRequestBuilder<'a, T> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query string parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as a string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.builder = self.builder.text(text);
        self
    }

    /// Set the request body as JSON.
    pub fn json<B: serde::Serialize>(mut self, value: &B) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Add a basic authorization header.
    pub fn basic_auth(mut self, username: impl AsRef<str>, password: Option<&str>) -> Self {
        self.builder = self.builder.basic_auth(username, password);
        self
    }

    /// The request as it would be sent.
    pub fn build(self) -> RequestBuilder {
        self.builder
    }

    /// Send the request and return the response.
    pub fn send(self) -> Result<Response, FetchError> {
        self.client.transport.send(self.builder)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogService, FetchClient, FetchError, GraphqlClient, Method, QueryProvider, Response,
        RetryPolicy, StoreApiClient, Transport,
    };
}
