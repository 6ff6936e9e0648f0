//! Storefront configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::Currency;
use storefront_data::DEFAULT_STORE_API_PATH;

/// Contents of `storefront.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub cms: CmsConfig,

    #[serde(default)]
    pub localization: LocalizationConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub cart: CartConfig,
}

impl SiteConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply `STOREFRONT_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("STOREFRONT_SITE_NAME") {
            self.site.name = v;
        }
        if let Some(v) = get("STOREFRONT_WP_URL") {
            self.cms.wp_url = v;
        }
        if let Some(v) = get("STOREFRONT_GRAPHQL_ENDPOINT") {
            self.cms.graphql_endpoint = v;
        }
        if let Some(v) = get("STOREFRONT_LANGUAGE") {
            self.localization.language = v;
        }
        if let Some(v) = get("STOREFRONT_CURRENCY") {
            self.localization.currency = v;
        }
        if let Some(v) = get("STOREFRONT_CART_DIR") {
            self.cart.storage_dir = v;
        }
        self
    }

    /// Display currency. Unknown codes fall back to THB.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.localization.currency).unwrap_or_else(|| {
            tracing::warn!(code = %self.localization.currency, "unknown currency, using THB");
            Currency::THB
        })
    }
}

/// Core site information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSection {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_site_url")]
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

fn default_site_name() -> String {
    "Mae Thuan Store".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            description: None,
        }
    }
}

/// CMS endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmsConfig {
    /// CMS base URL.
    #[serde(default = "default_wp_url")]
    pub wp_url: String,

    /// GraphQL endpoint.
    #[serde(default = "default_graphql_endpoint")]
    pub graphql_endpoint: String,

    /// Store API path below `wp_url`.
    #[serde(default = "default_store_api_path")]
    pub store_api_path: String,
}

fn default_wp_url() -> String {
    "https://demo.wp.com".to_string()
}

fn default_graphql_endpoint() -> String {
    "https://demo.wp.com/graphql".to_string()
}

fn default_store_api_path() -> String {
    DEFAULT_STORE_API_PATH.to_string()
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            wp_url: default_wp_url(),
            graphql_endpoint: default_graphql_endpoint(),
            store_api_path: default_store_api_path(),
        }
    }
}

/// Language and currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalizationConfig {
    /// Language code for badge labels (`th` or anything else for English).
    #[serde(default = "default_language")]
    pub language: String,

    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_language() -> String {
    "th".to_string()
}

fn default_currency() -> String {
    "THB".to_string()
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            currency: default_currency(),
        }
    }
}

/// Revalidation times in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_revalidate")]
    pub default_revalidate: u64,

    #[serde(default = "default_entity_revalidate")]
    pub product: u64,

    #[serde(default = "default_entity_revalidate")]
    pub category: u64,
}

fn default_revalidate() -> u64 {
    60
}

fn default_entity_revalidate() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_revalidate: default_revalidate(),
            product: default_entity_revalidate(),
            category: default_entity_revalidate(),
        }
    }
}

/// Where the cart record lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Directory for the cart record, relative to the config file.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

fn default_storage_dir() -> String {
    ".storefront/cart".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
        }
    }
}

/// Generate a starter `storefront.toml`.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Headless storefront configuration

[site]
name = "{name}"
url = "http://localhost:3000"

[cms]
wp_url = "https://demo.wp.com"
graphql_endpoint = "https://demo.wp.com/graphql"
store_api_path = "{store_api_path}"

[localization]
language = "th"
currency = "THB"

[cache]
default_revalidate = 60
product = 300
category = 300

[cart]
storage_dir = ".storefront/cart"
"#,
        name = name,
        store_api_path = DEFAULT_STORE_API_PATH,
    )
}
