//! Save/load hooks for the persisted cart record.

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::error::CommerceError;

/// Name of the durable record holding the cart.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// The persisted part of the cart. UI state such as the drawer flag is
/// not part of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersistedCart {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// A durable home for the cart record.
///
/// The store calls `save` after every mutation and `load` once when it is
/// opened.
pub trait CartStorage {
    /// Read the record, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedCart>, CommerceError>;

    /// Replace the record.
    fn save(&self, cart: &PersistedCart) -> Result<(), CommerceError>;
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn load(&self) -> Result<Option<PersistedCart>, CommerceError> {
        (**self).load()
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), CommerceError> {
        (**self).save(cart)
    }
}

/// Keeps the record in memory. Useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: RefCell<Option<PersistedCart>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing record, as if saved by an earlier session.
    pub fn with_record(record: PersistedCart) -> Self {
        Self {
            record: RefCell::new(Some(record)),
            saves: Cell::new(0),
        }
    }

    /// The last saved record.
    pub fn record(&self) -> Option<PersistedCart> {
        self.record.borrow().clone()
    }

    /// Number of saves performed.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedCart>, CommerceError> {
        Ok(self.record.borrow().clone())
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), CommerceError> {
        *self.record.borrow_mut() = Some(cart.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Keeps the record in a [`storefront_cache::Cache`] under a fixed key.
#[cfg(feature = "storage")]
pub struct CacheStorage {
    cache: storefront_cache::Cache,
    key: String,
}

#[cfg(feature = "storage")]
impl CacheStorage {
    /// Store under [`CART_STORAGE_KEY`].
    pub fn new(cache: storefront_cache::Cache) -> Self {
        Self::with_key(cache, CART_STORAGE_KEY)
    }

    pub fn with_key(cache: storefront_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache(&self) -> &storefront_cache::Cache {
        &self.cache
    }
}

#[cfg(feature = "storage")]
impl CartStorage for CacheStorage {
    fn load(&self) -> Result<Option<PersistedCart>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, cart)?)
    }
}
