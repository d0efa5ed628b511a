//! JSON values under string keys
//!
//! LocalStorage in the browser. Native builds keep a per-thread map so the
//! same load/save paths run in the headless demo and in tests.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::StorageError;

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    pub fn get(key: &str) -> Result<Option<String>, StorageError> {
        storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{e:?}")))
    }

    pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
        storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{e:?}")))
    }

    pub fn remove(key: &str) -> Result<(), StorageError> {
        storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Access(format!("{e:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::StorageError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static ITEMS: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get(key: &str) -> Result<Option<String>, StorageError> {
        Ok(ITEMS.with(|items| items.borrow().get(key).cloned()))
    }

    pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
        ITEMS.with(|items| items.borrow_mut().insert(key.to_string(), value.to_string()));
        Ok(())
    }

    pub fn remove(key: &str) -> Result<(), StorageError> {
        ITEMS.with(|items| items.borrow_mut().remove(key));
        Ok(())
    }
}

/// Read and decode `key`. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    match backend::get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    backend::set(key, &json)
}

pub fn remove(key: &str) -> Result<(), StorageError> {
    backend::remove(key)
}

/// Load `key`, falling back to `T::default()` when missing or unreadable
pub fn load_or_default<T: DeserializeOwned + Default>(key: &str) -> T {
    match load_json(key) {
        Ok(Some(value)) => {
            log::info!("Loaded '{}' from storage", key);
            value
        }
        Ok(None) => {
            log::info!("No '{}' in storage, using defaults", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Ignoring stored '{}': {}", key, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        save_json("storage_test_numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json("storage_test_numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        remove("storage_test_numbers").unwrap();
        let loaded: Option<Vec<i32>> = load_json("storage_test_numbers").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        backend::set("storage_test_corrupt", "{not json").unwrap();
        assert!(matches!(
            load_json::<Vec<i32>>("storage_test_corrupt"),
            Err(StorageError::Json(_))
        ));
        let fallback: Vec<i32> = load_or_default("storage_test_corrupt");
        assert!(fallback.is_empty());
    }
}
