//! Type-safe Key-Value store for storefront client state.
//!
//! Values are stored as JSON. Three backends are available:
//!
//! - an in-process map ([`Cache::memory`]), lost when the process exits
//! - a directory with one JSON file per key ([`Cache::open_dir`]), which
//!   survives restarts and is what the CLI uses for the shopping cart
//! - Spin's Key-Value Store on `wasm32` ([`Cache::open_default`])
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//!
//! let cache = Cache::open_dir(".storefront")?;
//!
//! cache.set("cart-storage", &persisted)?;
//! let restored: Option<PersistedCart> = cache.get("cart-storage")?;
//! cache.delete("cart-storage")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
