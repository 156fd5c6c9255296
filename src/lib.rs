//! MotoScan
//!
//! Cliente de gestión de flota de motos en el pátio: validación de
//! placas, clasificación de estado, mapa por zonas, API REST y sesión
//! local.

pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use client::MotoScanClient;
pub use models::{Motorcycle, MotorcycleDraft, MotorcycleStatus, MotorcycleUpdate};
pub use utils::errors::{AppError, AppResult};
