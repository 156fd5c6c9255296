//! Lista local de motos
//!
//! Copia plana de las motos bajo la clave `motos`. Se usa como caché de la
//! última lista obtenida del backend y para registros sin conexión.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{KeyValueStore, MOTORCYCLES_KEY};
use crate::models::motorcycle::Motorcycle;
use crate::utils::errors::AppResult;

/// Las escrituras leen y reescriben la lista completa bajo `write_lock`,
/// así dos clones que escriben a la vez no se pisan.
#[derive(Clone)]
pub struct LocalMotorcycleStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalMotorcycleStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Motorcycle>> {
        match self.store.get_item(MOTORCYCLES_KEY).await? {
            Some(raw) => {
                let motorcycles: Vec<Motorcycle> = serde_json::from_str(&raw)?;
                debug!("📦 {} motos en la lista local", motorcycles.len());
                Ok(motorcycles)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Agregar al final de la lista
    pub async fn append(&self, moto: Motorcycle) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut motorcycles = self.list().await?;
        if motorcycles.iter().any(|m| m.plate == moto.plate) {
            warn!("⚠️ Placa {} ya estaba en la lista local", moto.plate);
        }
        motorcycles.push(moto);
        self.write(&motorcycles).await
    }

    pub async fn replace_all(&self, motorcycles: &[Motorcycle]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write(motorcycles).await
    }

    async fn write(&self, motorcycles: &[Motorcycle]) -> AppResult<()> {
        let serialized = serde_json::to_string(motorcycles)?;
        self.store.set_item(MOTORCYCLES_KEY, &serialized).await
    }

    /// Reemplazar la moto con la misma placa; `false` si no estaba
    pub async fn upsert(&self, moto: Motorcycle) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut motorcycles = self.list().await?;
        let replaced = match motorcycles.iter_mut().find(|m| m.plate == moto.plate) {
            Some(existing) => {
                *existing = moto;
                true
            }
            None => {
                motorcycles.push(moto);
                false
            }
        };
        self.write(&motorcycles).await?;
        Ok(replaced)
    }

    /// Quitar por placa; `false` si no estaba
    pub async fn remove(&self, plate: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut motorcycles = self.list().await?;
        let before = motorcycles.len();
        motorcycles.retain(|m| m.plate != plate);
        if motorcycles.len() == before {
            return Ok(false);
        }
        self.write(&motorcycles).await?;
        Ok(true)
    }
}
