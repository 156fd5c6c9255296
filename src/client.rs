//! Cliente HTTP para el backend de MotoScan
//!
//! Este módulo contiene el cliente de la API REST de motos (`/motos`) y
//! de autenticación (`/auth`). El token de sesión se lee del
//! `SessionStore` en cada request y se envía como `Bearer` sólo si existe.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::motorcycle::{Motorcycle, MotorcycleDraft, MotorcycleUpdate};
use crate::services::plate_validation::validate_plate_for_submit;
use crate::storage::SessionStore;
use crate::utils::errors::{conflict_error, validation_error, AppError, AppResult};

/// Cliente HTTP para la API de motos y de autenticación
#[derive(Clone)]
pub struct MotoScanClient {
    client: Client,
    api_base_url: String,
    auth_base_url: String,
    session: SessionStore,
}

impl MotoScanClient {
    /// Crear nuevo cliente HTTP con las URLs configuradas
    pub fn new(config: &EnvironmentConfig, session: SessionStore) -> AppResult<Self> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn motos_url(&self) -> String {
        format!("{}/motos", self.api_base_url)
    }

    fn moto_url(&self, plate: &str) -> String {
        format!("{}/motos/{}", self.api_base_url, urlencoding::encode(plate))
    }

    /// Headers comunes; `Authorization` sólo cuando hay token guardado
    pub async fn auth_headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.get_token().await? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AppError::Unauthorized("stored token is not a valid header".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("🔓 Sin token de sesión, request sin Authorization");
        }

        Ok(headers)
    }

    /// Obtener todas las motos
    pub async fn list_motorcycles(&self) -> AppResult<Vec<Motorcycle>> {
        let url = self.motos_url();
        info!("🏍️ GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers().await?)
            .send()
            .await?;

        let motorcycles: Vec<Motorcycle> = parse_json(response, "listar motos").await?;
        info!("✅ {} motos recibidas", motorcycles.len());
        Ok(motorcycles)
    }

    /// Registrar una moto; `Conflict` si la placa ya existe
    pub async fn create_motorcycle(&self, draft: &MotorcycleDraft) -> AppResult<Motorcycle> {
        let url = self.motos_url();
        info!("🏍️ POST {} placa={}", url, draft.plate());

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers().await?)
            .json(draft)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            warn!("⚠️ Placa {} ya registrada", draft.plate());
            return Err(conflict_error("Moto", "placa", draft.plate()));
        }

        let created: Motorcycle = parse_json(response, "registrar moto").await?;
        info!("✅ Moto {} registrada", created.plate);
        Ok(created)
    }

    /// Actualizar campos de una moto; la placa identifica y no cambia
    pub async fn update_motorcycle(
        &self,
        plate: &str,
        update: &MotorcycleUpdate,
    ) -> AppResult<Motorcycle> {
        let plate = validate_plate_for_submit(plate)?;
        if update.is_empty() {
            return Err(validation_error("update", "at least one field must be present"));
        }

        let url = self.moto_url(&plate);
        info!("🏍️ PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers().await?)
            .json(update)
            .send()
            .await?;

        let updated: Motorcycle = parse_json(response, "actualizar moto").await?;
        info!("✅ Moto {} actualizada", updated.plate);
        Ok(updated)
    }

    /// Eliminar una moto; `Ok(false)` si el backend no respondió 2xx
    pub async fn delete_motorcycle(&self, plate: &str) -> AppResult<bool> {
        let plate = validate_plate_for_submit(plate)?;
        let url = self.moto_url(&plate);
        info!("🗑️ DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers().await?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("✅ Moto {} eliminada", plate);
        } else {
            warn!("⚠️ DELETE {} respondió {}", url, status);
        }
        Ok(status.is_success())
    }

    /// Login: el backend devuelve el token como texto plano
    pub async fn login(&self, request: &LoginRequest) -> AppResult<String> {
        request.validate()?;

        let url = format!("{}/login", self.auth_base_url);
        info!("🔐 Login de {}", request.email);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("❌ Login rechazado ({}): {}", status, body);
            return Err(AppError::Unauthorized(format!("login failed with status {}", status)));
        }

        let token = response.text().await?.trim().to_string();
        if token.is_empty() {
            return Err(AppError::ExternalApi {
                status: status.as_u16(),
                message: "login returned an empty token".to_string(),
            });
        }

        self.session.set_token(&token).await?;
        info!("✅ Login exitoso");
        Ok(token)
    }

    /// Registrar un usuario nuevo
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<bool> {
        request.validate()?;

        let url = format!("{}/register", self.auth_base_url);
        info!("📝 Registro de {}", request.email);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ Registro respondió {}", status);
        }
        Ok(status.is_success())
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.session.clear_token().await
    }
}

/// Parsear una respuesta exitosa o traducir el código HTTP a `AppError`
async fn parse_json<T: DeserializeOwned>(response: Response, operation: &str) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        error!("❌ {} falló con status {}: {}", operation, status, body);
        let message = if body.trim().is_empty() {
            format!("{} failed with status {}", operation, status)
        } else {
            body
        };
        return Err(AppError::from_status(status, message));
    }

    serde_json::from_str(&body).map_err(|e| {
        error!("❌ Respuesta inválida en {}: {}", operation, e);
        AppError::Serialization(e)
    })
}
