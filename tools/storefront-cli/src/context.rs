//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::cart::{CacheStorage, CartStore};
use storefront_data::{CatalogService, GraphqlClient, StoreApiClient};

use crate::config::SiteConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, with environment overrides applied.
    pub config: SiteConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the loaded config file, or the working directory.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                (SiteConfig::load(&path)?, root)
            }
            None => match find_config(&cwd) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using config file");
                    let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                    (SiteConfig::load(&path)?, root)
                }
                None => (SiteConfig::default(), cwd.clone()),
            },
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            root,
        })
    }

    /// Directory holding the persisted cart record.
    pub fn cart_dir(&self) -> PathBuf {
        resolve(&self.root, &self.config.cart.storage_dir)
    }

    /// Open the cart store, seeded from the persisted record.
    pub fn open_cart(&self) -> Result<CartStore<CacheStorage>> {
        let dir = self.cart_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        Ok(CartStore::open(CacheStorage::new(cache)))
    }

    /// Catalog service against the configured GraphQL endpoint.
    pub fn catalog(&self) -> CatalogService<GraphqlClient> {
        CatalogService::new(GraphqlClient::new(self.config.cms.graphql_endpoint.as_str()))
    }

    /// Store API client for the configured shop.
    pub fn store_api(&self) -> StoreApiClient {
        StoreApiClient::new(&self.config.cms.wp_url, &self.config.cms.store_api_path)
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to `base` unless it is absolute.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("storefront.toml")));
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.json"), "{}").unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("storefront.toml")));
    }

    #[test]
    fn test_cart_dir_is_relative_to_root() {
        let ctx = Context {
            config: SiteConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work/sub"),
            root: PathBuf::from("/work"),
        };
        assert_eq!(ctx.cart_dir(), PathBuf::from("/work/.storefront/cart"));
    }

    #[test]
    fn test_open_cart_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: SiteConfig::default(),
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
            root: dir.path().to_path_buf(),
        };

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(storefront_commerce::cart::NewCartLine::new(
            "1",
            "1",
            "Mug",
            rust_decimal::Decimal::from(100),
        ));

        assert_eq!(ctx.open_cart().unwrap().total_items(), 1);
        assert!(ctx.cart_dir().join("cart-storage.json").is_file());
    }
}
