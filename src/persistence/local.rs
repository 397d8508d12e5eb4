//! Browser LocalStorage backend

use super::{Storage, StorageError};

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Grab `window.localStorage`
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("window.localStorage".to_string()))?;
        Ok(Self { inner })
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", e))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(js_err)
    }
}
