use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AuthError;

/// Persistent home of the credential token.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), AuthError>;
    fn remove(&self) -> Result<(), AuthError>;
}

/// Token kept in `window.localStorage` under a fixed key.
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    /// Returns `None` when localStorage cannot be reached (e.g. disabled by
    /// the browser's privacy settings).
    pub fn new(key: impl Into<String>) -> Option<Self> {
        local_storage().ok()?;
        Some(Self { key: key.into() })
    }
}

fn local_storage() -> Result<web_sys::Storage, AuthError> {
    let window = web_sys::window().ok_or_else(|| AuthError::Storage("no window".to_string()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(AuthError::Storage("localStorage disabled".to_string())),
        Err(e) => Err(AuthError::Storage(format!("{e:?}"))),
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        let storage = local_storage().ok()?;
        match storage.get_item(&self.key) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read token from localStorage: {e:?}");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        local_storage()?
            .set_item(&self.key, token)
            .map_err(|e| AuthError::Storage(format!("{e:?}")))
    }

    fn remove(&self) -> Result<(), AuthError> {
        local_storage()?
            .remove_item(&self.key)
            .map_err(|e| AuthError::Storage(format!("{e:?}")))
    }
}

/// Token kept for the lifetime of the page only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}

/// localStorage when available, otherwise an in-memory fallback.
pub fn browser_token_store(key: &str) -> Rc<dyn TokenStore> {
    match LocalStorageTokenStore::new(key) {
        Some(store) => Rc::new(store),
        None => {
            tracing::warn!("localStorage unavailable; session will not survive a reload");
            Rc::new(MemoryTokenStore::default())
        }
    }
}
