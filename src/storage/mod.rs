//! Almacenamiento local
//!
//! Este módulo contiene el almacén clave-valor del dispositivo y los
//! envoltorios tipados que lo usan (sesión y lista local de motos).

pub mod key_value;
pub mod motorcycle_store;
pub mod session;

pub use key_value::{FileStore, KeyValueStore, MemoryStore};
pub use motorcycle_store::LocalMotorcycleStore;
pub use session::SessionStore;

/// Claves usadas en el almacén
pub const TOKEN_KEY: &str = "userToken";
pub const MOTORCYCLES_KEY: &str = "motos";
