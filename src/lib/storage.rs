//! Durable storage for the session token. The browser build keeps exactly one
//! opaque value in `localStorage` under a single well-known key; nothing else
//! about the session is ever persisted. Storage failures are ignored — a
//! missing token just means the next startup recovers to signed-out.

use std::rc::Rc;

/// The one key this application writes to durable storage.
pub const TOKEN_STORAGE_KEY: &str = "naai_token";

/// Opaque pass-through store for the session token.
pub trait TokenStore {
    fn save(&self, token: &str);
    fn load(&self) -> Option<String>;
    fn clear(&self);
}

/// `localStorage`-backed store, scoped to the application origin.
#[cfg(target_arch = "wasm32")]
pub struct BrowserTokenStore;

#[cfg(target_arch = "wasm32")]
impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for BrowserTokenStore {
    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
    }

    fn load(&self) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

/// In-memory store used off-wasm and in tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: std::cell::RefCell<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

/// The store for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Rc<dyn TokenStore> {
    Rc::new(BrowserTokenStore)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Rc<dyn TokenStore> {
    Rc::new(MemoryTokenStore::default())
}

#[cfg(test)]
mod tests {
    use super::{MemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore};

    #[test]
    fn memory_store_round_trips_a_token() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);

        store.save("tok-123");
        assert_eq!(store.load(), Some("tok-123".to_string()));

        store.save("tok-456");
        assert_eq!(store.load(), Some("tok-456".to_string()));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryTokenStore::default();
        store.save("tok-123");

        store.clear();
        assert_eq!(store.load(), None);

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn storage_key_is_stable() {
        // Changing this key silently signs every user out on upgrade.
        assert_eq!(TOKEN_STORAGE_KEY, "naai_token");
    }
}
