//! Estado compartido de la aplicación
//!
//! Agrupa la configuración, el cliente HTTP y los almacenes locales que
//! usan los comandos de la CLI.

use std::sync::Arc;

use crate::client::MotoScanClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::yard_layout::YardConfig;
use crate::storage::{FileStore, KeyValueStore, LocalMotorcycleStore, SessionStore};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub client: MotoScanClient,
    pub session: SessionStore,
    pub local_motorcycles: LocalMotorcycleStore,
    pub yard: YardConfig,
}

impl AppState {
    /// Estado con el almacén en el archivo configurado
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: EnvironmentConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let session = SessionStore::new(store.clone());
        let client = MotoScanClient::new(&config, session.clone())?;
        let yard = YardConfig::with_slots(config.zone_capacity);

        Ok(Self {
            local_motorcycles: LocalMotorcycleStore::new(store),
            config,
            client,
            session,
            yard,
        })
    }
}
