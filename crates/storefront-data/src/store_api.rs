//! Client for the commerce Store API (`/wp-json/wc/store/v1`).
//!
//! Responses are returned as raw JSON. This client talks to the server
//! cart and is independent of the local [`CartStore`].
//!
//! [`CartStore`]: storefront_commerce::cart::CartStore

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::request::encode_component;
use crate::{ClientRequestBuilder, FetchClient, FetchError, HttpTransport, Transport};

/// Default Store API path below the CMS base URL.
pub const DEFAULT_STORE_API_PATH: &str = "/wp-json/wc/store/v1";

/// One selected attribute of a variable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariationSelection {
    pub attribute: String,
    pub value: String,
}

/// Body of `POST /cart/add-item`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddToCartRequest {
    pub id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub variation: Vec<VariationSelection>,
}

impl AddToCartRequest {
    pub fn new(id: i64, quantity: u32) -> Self {
        Self {
            id,
            quantity,
            variation: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.variation.push(VariationSelection {
            attribute: attribute.into(),
            value: value.into(),
        });
        self
    }
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub on_sale: Option<bool>,
    pub featured: Option<bool>,
}

impl ProductQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(on_sale) = self.on_sale {
            params.push(("on_sale", on_sale.to_string()));
        }
        if let Some(featured) = self.featured {
            params.push(("featured", featured.to_string()));
        }
        params
    }
}

/// Store API client bound to one shop.
pub struct StoreApiClient<T: Transport = HttpTransport> {
    fetch: FetchClient<T>,
}

impl StoreApiClient<HttpTransport> {
    /// Client for `<wp_url><store_api_path>`.
    pub fn new(wp_url: &str, store_api_path: &str) -> Self {
        Self::with_transport(wp_url, store_api_path, HttpTransport::new())
    }
}

impl<T: Transport> StoreApiClient<T> {
    pub fn with_transport(wp_url: &str, store_api_path: &str, transport: T) -> Self {
        let base = format!(
            "{}/{}",
            wp_url.trim_end_matches('/'),
            store_api_path.trim_start_matches('/')
        );
        Self {
            fetch: FetchClient::with_transport(transport)
                .with_base_url(base)
                .with_default_header("Content-Type", "application/json"),
        }
    }

    pub fn base_url(&self) -> &str {
        self.fetch.base_url().unwrap_or_default()
    }

    pub fn transport(&self) -> &T {
        self.fetch.transport()
    }

    // Cart

    pub fn get_cart(&self) -> Result<Value, FetchError> {
        self.send(self.fetch.get("/cart"))
    }

    pub fn add_to_cart(&self, item: &AddToCartRequest) -> Result<Value, FetchError> {
        self.send(self.fetch.post("/cart/add-item").json(item)?)
    }

    pub fn update_cart_item(&self, key: &str, quantity: u32) -> Result<Value, FetchError> {
        let path = format!("/cart/items/{}", encode_component(key));
        self.send(self.fetch.post(path).json(&json!({ "quantity": quantity }))?)
    }

    pub fn remove_cart_item(&self, key: &str) -> Result<Value, FetchError> {
        self.send(self.fetch.delete(format!("/cart/items/{}", encode_component(key))))
    }

    pub fn clear_cart(&self) -> Result<Value, FetchError> {
        self.send(self.fetch.delete("/cart/items"))
    }

    // Checkout

    pub fn create_order(&self, order: &Value) -> Result<Value, FetchError> {
        self.send(self.fetch.post("/checkout").json(order)?)
    }

    pub fn shipping_rates(&self) -> Result<Value, FetchError> {
        self.send(self.fetch.get("/cart/shipping-rates"))
    }

    pub fn apply_coupon(&self, code: &str) -> Result<Value, FetchError> {
        self.send(self.fetch.post("/cart/coupons").json(&json!({ "code": code }))?)
    }

    pub fn remove_coupon(&self, code: &str) -> Result<Value, FetchError> {
        self.send(self.fetch.delete(format!("/cart/coupons/{}", encode_component(code))))
    }

    // Products

    pub fn products(&self, query: &ProductQuery) -> Result<Value, FetchError> {
        let request = query
            .params()
            .into_iter()
            .fold(self.fetch.get("/products"), |req, (k, v)| req.query(k, v));
        self.send(request)
    }

    pub fn product(&self, id: i64) -> Result<Value, FetchError> {
        self.send(self.fetch.get(format!("/products/{}", id)))
    }

    pub fn product_categories(&self) -> Result<Value, FetchError> {
        self.send(self.fetch.get("/products/categories"))
    }

    fn send(&self, request: ClientRequestBuilder<'_, T>) -> Result<Value, FetchError> {
        let response = request.send()?.error_for_status()?;
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        response.json()
    }
}
