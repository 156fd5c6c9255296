//! Services module
//!
//! Lógica de dominio pura: validación de placas, clasificación de estado
//! y agregación por zonas. Nada aquí hace I/O.

pub mod plate_validation;
pub mod status_classifier;
pub mod yard_layout;

pub use plate_validation::*;
pub use status_classifier::*;
pub use yard_layout::*;
