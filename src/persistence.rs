//! Durable key-value storage for the cart and the auth token.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::{reduce, CartAction, CartItem, CartState};
use crate::store::ItemsObserver;
use crate::{CartError, Result};

/// Storage key of the persisted item list.
pub const CART_KEY: &str = "cart";
/// Storage key of the bearer token.
pub const AUTHORIZATION_KEY: &str = "Authorization";

/// String key-value store. Serialization is the caller's concern.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CartError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage, for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Loads and saves the cart item list under [`CART_KEY`].
#[derive(Clone)]
pub struct CartPersistence {
    storage: Arc<dyn KeyValueStorage>,
}

impl CartPersistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self { Self { storage } }

    /// Startup state. A missing, unreadable or malformed entry yields an empty
    /// cart; nothing is reported to the caller.
    pub fn hydrate(&self) -> CartState {
        let raw = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartState::empty(),
            Err(e) => {
                warn!(error = %e, "failed to read persisted cart");
                return CartState::empty();
            }
        };
        let action = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => CartAction::load_from_json(value),
            Err(e) => {
                warn!(error = %e, "persisted cart is not valid JSON");
                CartAction::LoadCart(None)
            }
        };
        reduce(&CartState::empty(), action)
    }

    /// Best effort; failures are logged and swallowed.
    pub fn save(&self, items: &[CartItem]) {
        let result = serde_json::to_string(items).map_err(CartError::from).and_then(|json| self.storage.set(CART_KEY, &json));
        match result {
            Ok(()) => debug!(items = items.len(), "cart persisted"),
            Err(e) => warn!(error = %e, "failed to persist cart"),
        }
    }
}

impl ItemsObserver for CartPersistence {
    fn items_changed(&self, items: &[CartItem]) { self.save(items); }
}

/// Bearer token kept under [`AUTHORIZATION_KEY`].
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self { Self { storage } }

    pub fn token(&self) -> Option<String> {
        match self.storage.get(AUTHORIZATION_KEY) {
            Ok(token) => token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read auth token");
                None
            }
        }
    }

    /// Value for the `Authorization` header, if a token is stored.
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|t| if t.starts_with("Bearer ") { t } else { format!("Bearer {t}") })
    }

    pub fn set_token(&self, token: &str) -> Result<()> { self.storage.set(AUTHORIZATION_KEY, token) }
    pub fn clear_token(&self) -> Result<()> { self.storage.remove(AUTHORIZATION_KEY) }
}
