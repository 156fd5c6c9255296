//! Sesión del usuario
//!
//! Guarda el token devuelto por el login bajo la clave `userToken`.

use std::sync::Arc;
use tracing::info;

use super::{KeyValueStore, TOKEN_KEY};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Token guardado; un valor vacío cuenta como ausente
    pub async fn get_token(&self) -> AppResult<Option<String>> {
        let token = self.store.get_item(TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    pub async fn set_token(&self, token: &str) -> AppResult<()> {
        self.store.set_item(TOKEN_KEY, token).await?;
        info!("🔑 Token de sesión guardado");
        Ok(())
    }

    pub async fn clear_token(&self) -> AppResult<()> {
        self.store.remove_item(TOKEN_KEY).await?;
        info!("👋 Sesión cerrada");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> AppResult<bool> {
        Ok(self.get_token().await?.is_some())
    }
}
