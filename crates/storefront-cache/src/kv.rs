//! Key-Value store wrapper with automatic serialization.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache with automatic JSON serialization.
///
/// Any type that implements `Serialize` and `DeserializeOwned` can be
/// stored. The backend is chosen when the cache is opened.
pub struct Cache {
    backend: Backend,
}

enum Backend {
    Memory(Mutex<HashMap<String, Vec<u8>>>),
    Dir(PathBuf),
    #[cfg(target_arch = "wasm32")]
    Spin(spin_sdk::key_value::Store),
}

impl Cache {
    /// Create an empty in-process cache.
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// Open a cache rooted at a directory, creating it if missing.
    ///
    /// Each key is stored as `<encoded-key>.json` inside the directory.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("/home/me/.local/share/storefront")?;
    /// ```
    pub fn open_dir(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", path.display(), e))
        })?;
        tracing::debug!(dir = %path.display(), "opened directory cache");
        Ok(Self {
            backend: Backend::Dir(path.to_path_buf()),
        })
    }

    /// Open the default Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self {
            backend: Backend::Spin(store),
        })
    }

    /// Open a named Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self {
            backend: Backend::Spin(store),
        })
    }

    // Outside Spin there is no host store; fall back to memory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::memory())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(_name: &str) -> Result<Self, CacheError> {
        Ok(Self::memory())
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<PersistedCart> = cache.get("cart-storage")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_bytes(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_bytes(key, &bytes)
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                lock(map)?.remove(key);
                Ok(())
            }
            Backend::Dir(dir) => match fs::remove_file(key_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            #[cfg(target_arch = "wasm32")]
            Backend::Spin(store) => store
                .delete(key)
                .map_err(|e| CacheError::StoreError(e.to_string())),
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.contains_key(key)),
            Backend::Dir(dir) => Ok(key_path(dir, key).is_file()),
            #[cfg(target_arch = "wasm32")]
            Backend::Spin(store) => store
                .exists(key)
                .map_err(|e| CacheError::StoreError(e.to_string())),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = match &self.backend {
            Backend::Memory(map) => lock(map)?.keys().cloned().collect::<Vec<_>>(),
            Backend::Dir(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().map_or(false, |e| e == "json") {
                        if let Some(key) = path
                            .file_stem()
                            .and_then(|s| s.to_str())
                            .and_then(decode_key)
                        {
                            keys.push(key);
                        }
                    }
                }
                keys
            }
            #[cfg(target_arch = "wasm32")]
            Backend::Spin(store) => store
                .get_keys()
                .map_err(|e| CacheError::StoreError(e.to_string()))?,
        };
        keys.sort();
        Ok(keys)
    }

    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Backend::Dir(dir) => match fs::read(key_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            #[cfg(target_arch = "wasm32")]
            Backend::Spin(store) => store
                .get(key)
                .map_err(|e| CacheError::StoreError(e.to_string())),
        }
    }

    fn set_bytes(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes.to_vec());
                Ok(())
            }
            Backend::Dir(dir) => {
                // Write then rename so a crash never leaves a torn record.
                let target = key_path(dir, key);
                let tmp = target.with_extension("json.tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &target)?;
                Ok(())
            }
            #[cfg(target_arch = "wasm32")]
            Backend::Spin(store) => store
                .set(key, bytes)
                .map_err(|e| CacheError::StoreError(e.to_string())),
        }
    }
}

fn lock(
    map: &Mutex<HashMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
}

fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", encode_key(key)))
}

/// Percent-encode everything outside `[A-Za-z0-9_-]` so any key is a
/// valid file name.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", user_id);
/// // Returns "cart:user123"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        items: Vec<String>,
    }

    fn record() -> Record {
        Record {
            items: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn test_memory_set_get_delete() {
        let cache = Cache::memory();
        assert_eq!(cache.get::<Record>("k").unwrap(), None);

        cache.set("k", &record()).unwrap();
        assert!(cache.exists("k").unwrap());
        assert_eq!(cache.get::<Record>("k").unwrap(), Some(record()));

        cache.delete("k").unwrap();
        assert!(!cache.exists("k").unwrap());
        // Deleting again is fine
        cache.delete("k").unwrap();
    }

    #[test]
    fn test_dir_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open_dir(dir.path()).unwrap();
            cache.set("cart-storage", &record()).unwrap();
        }
        let cache = Cache::open_dir(dir.path()).unwrap();
        assert_eq!(cache.get::<Record>("cart-storage").unwrap(), Some(record()));
    }

    #[test]
    fn test_dir_backend_keys_are_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();
        cache.set("cart:user/1", &1).unwrap();
        cache.set("plain", &2).unwrap();

        assert_eq!(cache.keys().unwrap(), vec!["cart:user/1", "plain"]);
        assert_eq!(cache.get::<i32>("cart:user/1").unwrap(), Some(1));
    }

    #[test]
    fn test_dir_backend_corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();

        let result: Result<Option<Record>, _> = cache.get("broken");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_key_encoding_roundtrip() {
        let key = "cart:ผู้ใช้ 1";
        let encoded = encode_key(key);
        assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'%' || b == b'_' || b == b'-'));
        assert_eq!(decode_key(&encoded).as_deref(), Some(key));
    }

    #[test]
    fn test_cache_key_macro() {
        let key = cache_key!("cart", "user123", 7);
        assert_eq!(key, "cart:user123:7");
    }
}
