use std::cell::RefCell;
use std::collections::HashMap;
use serde::{Serialize, de::DeserializeOwned};
use crate::errors::{AppError, AppResult};

/// Capacidad clave-valor inyectada (localStorage en el navegador, memoria en tests)
pub trait Storage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// Storage en memoria; registra cada escritura para poder inspeccionarla
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<(String, String)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escrituras en orden de llegada
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.borrow_mut().push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// window.localStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> AppResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| AppError::Storage("No se pudo acceder a localStorage".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| AppError::Storage("Error leyendo localStorage".to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| AppError::Storage("Error guardando en localStorage".to_string()))
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| AppError::Storage("Error eliminando de localStorage".to_string()))
    }
}

pub fn save_to_storage<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> AppResult<Option<T>> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
