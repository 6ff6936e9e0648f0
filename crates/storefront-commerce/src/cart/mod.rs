//! Shopping cart module.
//!
//! Contains the cart store, its line types, the persistence hooks and the
//! checkout summary.

mod line;
mod storage;
mod store;
mod summary;

pub use line::{CartLine, CartVariant, NewCartLine};
#[cfg(feature = "storage")]
pub use storage::CacheStorage;
pub use storage::{CartStorage, MemoryStorage, PersistedCart, CART_STORAGE_KEY};
pub use store::CartStore;
pub use summary::{LineSummary, OrderSummary};
