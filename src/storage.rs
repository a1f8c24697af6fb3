//! Key/value persistence backed by `window.localStorage`.

use wasm_bindgen::{JsCast, JsValue};

use crate::error::AppError;

/// String key/value store. The UI persists through `LocalStorage`;
/// tests substitute an in-memory map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage. Fails when there is no window or the
    /// browser refuses access (e.g. storage disabled by privacy settings).
    pub fn open() -> Result<Self, AppError> {
        let window = web_sys::window()
            .ok_or_else(|| AppError::StorageUnavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| AppError::StorageUnavailable(describe_js_error(e)))?
            .ok_or_else(|| AppError::StorageUnavailable("localStorage is disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("Failed to read '{}': {}", key, describe_js_error(e))))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {}", key, describe_js_error(e))))
    }
}

/// Thrown values are usually `DOMException`s (e.g. `QuotaExceededError`),
/// not strings.
pub(crate) fn describe_js_error(e: JsValue) -> String {
    if let Some(s) = e.as_string() {
        return s;
    }
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => format!("{}: {}", String::from(err.name()), String::from(err.message())),
        None => format!("{:?}", e),
    }
}
