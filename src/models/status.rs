//! Estado operacional de una moto
//!
//! El estado nunca se persiste: siempre se deriva de las banderas
//! `mechanical_issue` y `flagged` (ver `services::status_classifier`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado derivado de la moto en el pátio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MotorcycleStatus {
    Ready,
    MechanicalIssue,
    Flagged,
}

/// Par de banderas que produce una selección de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    pub mechanical_issue: bool,
    pub flagged: bool,
}

impl MotorcycleStatus {
    pub const ALL: [MotorcycleStatus; 3] = [
        MotorcycleStatus::Ready,
        MotorcycleStatus::MechanicalIssue,
        MotorcycleStatus::Flagged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MotorcycleStatus::Ready => "READY",
            MotorcycleStatus::MechanicalIssue => "MECHANICAL_ISSUE",
            MotorcycleStatus::Flagged => "FLAGGED",
        }
    }

    /// Etiqueta corta usada por el equipo del pátio
    pub fn code(&self) -> &'static str {
        match self {
            MotorcycleStatus::Ready => "PRONTA",
            MotorcycleStatus::MechanicalIssue => "MECANICO",
            MotorcycleStatus::Flagged => "BO",
        }
    }

    /// Acepta tanto la etiqueta corta (`BO`) como el nombre largo (`FLAGGED`)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRONTA" | "READY" => Some(MotorcycleStatus::Ready),
            "MECANICO" | "MECHANICAL_ISSUE" => Some(MotorcycleStatus::MechanicalIssue),
            "BO" | "FLAGGED" => Some(MotorcycleStatus::Flagged),
            _ => None,
        }
    }

    /// Banderas que se guardan al registrar una moto con este estado
    pub fn flags(&self) -> StatusFlags {
        match self {
            MotorcycleStatus::Ready => StatusFlags::default(),
            MotorcycleStatus::MechanicalIssue => StatusFlags {
                mechanical_issue: true,
                flagged: false,
            },
            MotorcycleStatus::Flagged => StatusFlags {
                mechanical_issue: false,
                flagged: true,
            },
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MotorcycleStatus::Ready => "Esta moto está pronta para ser alugada.",
            MotorcycleStatus::MechanicalIssue => {
                "Esta moto possui falhas mecânicas e precisa de manutenção."
            }
            MotorcycleStatus::Flagged => "Esta moto está com um boletim de ocorrência registrado.",
        }
    }
}

impl fmt::Display for MotorcycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
