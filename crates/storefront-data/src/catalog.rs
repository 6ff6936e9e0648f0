//! Catalog queries as the storefront pages use them.
//!
//! Every method here swallows failures: the error is logged and the caller
//! gets the empty result the page would render. Pages never see a fetch
//! error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use storefront_commerce::catalog::{CatalogProduct, Category, Connection, ProductPage};

use crate::queries;
use crate::{FetchError, QueryProvider};

#[derive(Deserialize)]
struct ProductsData {
    #[serde(default)]
    products: Option<ProductPage>,
}

#[derive(Deserialize)]
struct ProductData {
    #[serde(default)]
    product: Option<CatalogProduct>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoriesData {
    #[serde(default)]
    product_categories: Option<Connection<Category>>,
}

/// Catalog reads over a [`QueryProvider`].
pub struct CatalogService<P: QueryProvider> {
    provider: P,
}

impl<P: QueryProvider> CatalogService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Published products, newest first, with cursor pagination.
    pub fn products(&self, first: u32, after: Option<&str>) -> ProductPage {
        self.product_page(
            "products",
            queries::GET_PRODUCTS,
            json!({ "first": first, "after": after }),
        )
    }

    /// Products on sale.
    pub fn flash_sale_products(&self, first: u32) -> ProductPage {
        self.product_page(
            "flash_sale_products",
            queries::GET_FLASH_SALE_PRODUCTS,
            json!({ "first": first }),
        )
    }

    /// Featured products.
    pub fn featured_products(&self, first: u32) -> ProductPage {
        self.product_page(
            "featured_products",
            queries::GET_FEATURED_PRODUCTS,
            json!({ "first": first }),
        )
    }

    /// Products of one category. A zero id means no category is selected
    /// and yields an empty page without a request.
    pub fn products_by_category(
        &self,
        category_id: i64,
        first: u32,
        after: Option<&str>,
    ) -> ProductPage {
        if category_id == 0 {
            return ProductPage::empty();
        }
        self.product_page(
            "products_by_category",
            queries::GET_PRODUCTS_BY_CATEGORY,
            json!({ "categoryId": category_id, "first": first, "after": after }),
        )
    }

    /// One product by slug. Blank slugs yield `None` without a request.
    pub fn product_by_slug(&self, slug: &str) -> Option<CatalogProduct> {
        if slug.trim().is_empty() {
            return None;
        }
        self.fetch::<ProductData>(
            "product_by_slug",
            queries::GET_PRODUCT_BY_SLUG,
            json!({ "slug": slug }),
        )
        .and_then(|d| d.product)
    }

    /// Search by term. Blank terms yield an empty page without a request.
    pub fn search_products(&self, term: &str, first: u32) -> ProductPage {
        if term.trim().is_empty() {
            return ProductPage::empty();
        }
        self.product_page(
            "search_products",
            queries::SEARCH_PRODUCTS,
            json!({ "search": term, "first": first }),
        )
    }

    /// Non-empty categories.
    pub fn categories(&self, first: u32) -> Vec<Category> {
        self.fetch::<CategoriesData>(
            "categories",
            queries::GET_PRODUCT_CATEGORIES,
            json!({ "first": first }),
        )
        .and_then(|d| d.product_categories)
        .map(|c| c.nodes)
        .unwrap_or_default()
    }

    fn product_page(&self, operation: &'static str, query: &str, variables: Value) -> ProductPage {
        self.fetch::<ProductsData>(operation, query, variables)
            .and_then(|d| d.products)
            .unwrap_or_else(ProductPage::empty)
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Option<T> {
        let result = self
            .provider
            .query(query, variables)
            .and_then(|data| serde_json::from_value::<T>(data).map_err(FetchError::from));

        match result {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::error!(operation, error = %e, "catalog query failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Answers every query with the same result and records variables.
    struct FixedProvider {
        answer: Result<Value, FetchError>,
        calls: RefCell<Vec<(String, Value)>>,
    }

    impl FixedProvider {
        fn new(answer: Result<Value, FetchError>) -> Self {
            Self {
                answer,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl QueryProvider for FixedProvider {
        fn query(&self, query: &str, variables: Value) -> Result<Value, FetchError> {
            self.calls.borrow_mut().push((query.to_string(), variables));
            self.answer.clone()
        }
    }

    fn page_json() -> Value {
        json!({
            "products": {
                "nodes": [
                    { "databaseId": 1, "slug": "mug", "name": "Mug", "onSale": false, "price": "8900" },
                    { "databaseId": 2, "slug": "tee", "name": "Tee", "onSale": true,
                      "regularPrice": "300", "salePrice": "250" }
                ],
                "pageInfo": { "hasNextPage": true, "endCursor": "YXJyYXk6MQ==" }
            }
        })
    }

    #[test]
    fn test_products_decodes_page() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(page_json())));
        let page = catalog.products(12, Some("abc"));

        assert_eq!(page.nodes.len(), 2);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("YXJyYXk6MQ=="));

        let calls = catalog.provider().calls.borrow();
        assert_eq!(calls[0].0, queries::GET_PRODUCTS);
        assert_eq!(calls[0].1, json!({ "first": 12, "after": "abc" }));
    }

    #[test]
    fn test_failures_yield_empty_results() {
        let catalog = CatalogService::new(FixedProvider::new(Err(FetchError::GraphqlError(
            "Internal server error".to_string(),
        ))));

        assert_eq!(catalog.products(12, None), ProductPage::empty());
        assert!(catalog.flash_sale_products(8).is_empty());
        assert!(catalog.featured_products(8).is_empty());
        assert!(catalog.products_by_category(15, 12, None).is_empty());
        assert!(catalog.search_products("mug", 20).is_empty());
        assert!(catalog.product_by_slug("mug").is_none());
        assert!(catalog.categories(20).is_empty());
    }

    #[test]
    fn test_undecodable_data_yields_empty_page() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(
            json!({ "products": { "nodes": "nope" } }),
        )));
        assert!(catalog.featured_products(8).is_empty());
    }

    #[test]
    fn test_blank_inputs_skip_the_request() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(page_json())));
        assert!(catalog.search_products("   ", 20).is_empty());
        assert!(catalog.product_by_slug("").is_none());
        assert!(catalog.products_by_category(0, 12, None).is_empty());
        assert!(catalog.provider().calls.borrow().is_empty());
    }

    #[test]
    fn test_search_sends_term() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(page_json())));
        assert_eq!(catalog.search_products("tee", 5).nodes.len(), 2);
        assert_eq!(
            catalog.provider().calls.borrow()[0].1,
            json!({ "search": "tee", "first": 5 })
        );
    }

    #[test]
    fn test_product_by_slug_null_product() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(json!({ "product": null }))));
        assert!(catalog.product_by_slug("gone").is_none());
    }

    #[test]
    fn test_categories() {
        let catalog = CatalogService::new(FixedProvider::new(Ok(json!({
            "productCategories": { "nodes": [
                { "databaseId": 15, "slug": "kitchen", "name": "Kitchen", "count": 4 },
                { "databaseId": 16, "slug": "mugs", "name": "Mugs", "count": 2,
                  "parent": { "node": { "slug": "kitchen", "name": "Kitchen" } } }
            ] }
        }))));

        let categories = catalog.categories(20);
        assert_eq!(categories.len(), 2);
        assert!(categories[0].is_root());
        assert_eq!(categories[1].parent_slug(), Some("kitchen"));
    }
}
