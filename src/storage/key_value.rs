//! Almacén clave-valor
//!
//! Valores string bajo claves string, con implementación en memoria y en
//! un archivo JSON.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::utils::errors::{AppError, AppResult};

/// Operaciones del almacén
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    async fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// Almacén en memoria, para tests y sesiones efímeras
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Almacén persistido en un único archivo JSON (`{ "clave": "valor" }`)
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("💾 Almacén local en {}", path.display());
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Storage(format!("{} corrupto: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn save(&self, items: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, serialized).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let items = self.load().await?;
        debug!("📥 Lectura de clave {}: {}", key, items.contains_key(key));
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await?;
        debug!("💾 Clave {} guardada", key);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.save(&items).await?;
            debug!("🗑️ Clave {} eliminada", key);
        }
        Ok(())
    }
}
