//! Modelos de autenticación
//!
//! Payloads que el backend espera en `/auth/login` y `/auth/register`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request de login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub senha: String,
}

/// Request de registro de usuario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub senha: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            senha: senha.into(),
        }
    }
}

impl RegisterRequest {
    pub fn new(nome: impl Into<String>, email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            email: email.into(),
            senha: senha.into(),
        }
    }
}
