//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que viajan entre el cliente
//! y el backend de MotoScan.

pub mod auth;
pub mod motorcycle;
pub mod status;

pub use motorcycle::{Motorcycle, MotorcycleDraft, MotorcycleUpdate};
pub use status::{MotorcycleStatus, StatusFlags};
