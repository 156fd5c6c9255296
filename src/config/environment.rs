//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto; un valor presente pero inválido es un error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub auth_base_url: String,
    pub storage_path: PathBuf,
    pub http_timeout_secs: u64,
    pub zone_capacity: usize,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let api_base_url = "http://localhost:8080".to_string();
        Self {
            environment: "development".to_string(),
            auth_base_url: format!("{}/auth", api_base_url),
            api_base_url,
            storage_path: PathBuf::from("motoscan-storage.json"),
            http_timeout_secs: 30,
            zone_capacity: 5,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = var("MOTOSCAN_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let auth_base_url = var("MOTOSCAN_AUTH_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{}/auth", api_base_url));

        let zone_capacity = parse_var(&var, "MOTOSCAN_ZONE_CAPACITY", defaults.zone_capacity)?;
        if zone_capacity == 0 {
            return Err(config_error("MOTOSCAN_ZONE_CAPACITY", "must be at least 1"));
        }

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url,
            auth_base_url,
            storage_path: var("MOTOSCAN_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            http_timeout_secs: parse_var(&var, "MOTOSCAN_HTTP_TIMEOUT", defaults.http_timeout_secs)?,
            zone_capacity,
            log_level: parse_var(&var, "MOTOSCAN_LOG_LEVEL", defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_var<T, V>(var: &V, name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| config_error(name, &format!("invalid value '{}': {}", raw, e))),
        None => Ok(default),
    }
}
