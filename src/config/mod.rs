//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! cliente MotoScan.

pub mod environment;

pub use environment::*;
