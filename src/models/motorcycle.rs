//! Modelo de Motorcycle
//!
//! Este módulo contiene el struct Motorcycle y sus variantes para las
//! operaciones CRUD contra el backend. El JSON del backend es plano y usa
//! los nombres originales (`placa`, `modelo`, `zona`, `falhaMecanica`,
//! `roubada`, `multa`).

use serde::{Deserialize, Serialize};

use crate::models::status::{MotorcycleStatus, StatusFlags};
use crate::services::plate_validation::{validate_plate_for_submit, PlateError};
use crate::services::status_classifier::{classify, HasStatusFlags};

/// Moto tal como la devuelve el backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MotorcycleWire", into = "MotorcycleWire")]
pub struct Motorcycle {
    pub plate: String,
    pub model: String,
    pub zone: String,
    pub mechanical_issue: bool,
    pub flagged: bool,
    pub image: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Representación en el cable.
///
/// `roubada` y `multa` son la misma bandera: se leen con OR y se escriben
/// siempre iguales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MotorcycleWire {
    placa: String,
    modelo: String,
    zona: String,
    falha_mecanica: bool,
    roubada: bool,
    #[serde(default)]
    multa: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    imagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

impl From<MotorcycleWire> for Motorcycle {
    fn from(wire: MotorcycleWire) -> Self {
        Self {
            plate: wire.placa,
            model: wire.modelo,
            zone: wire.zona,
            mechanical_issue: wire.falha_mecanica,
            flagged: wire.roubada || wire.multa,
            image: wire.imagem,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

impl From<Motorcycle> for MotorcycleWire {
    fn from(moto: Motorcycle) -> Self {
        Self {
            placa: moto.plate,
            modelo: moto.model,
            zona: moto.zone,
            falha_mecanica: moto.mechanical_issue,
            roubada: moto.flagged,
            multa: moto.flagged,
            imagem: moto.image,
            created_at: moto.created_at,
            updated_at: moto.updated_at,
        }
    }
}

impl Motorcycle {
    /// Estado derivado de las banderas actuales
    pub fn status(&self) -> MotorcycleStatus {
        classify(self)
    }

    /// Aplicar una actualización parcial; la placa nunca cambia
    pub fn apply_update(&self, update: &MotorcycleUpdate) -> Motorcycle {
        Motorcycle {
            plate: self.plate.clone(),
            model: update.model.clone().unwrap_or_else(|| self.model.clone()),
            zone: update.zone.clone().unwrap_or_else(|| self.zone.clone()),
            mechanical_issue: update.mechanical_issue.unwrap_or(self.mechanical_issue),
            flagged: update.flagged.unwrap_or(self.flagged),
            image: self.image.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

impl HasStatusFlags for Motorcycle {
    fn mechanical_issue(&self) -> bool {
        self.mechanical_issue
    }

    fn flagged(&self) -> bool {
        self.flagged
    }
}

/// Request para registrar una nueva moto.
///
/// Sólo se puede construir con una placa que pasó la validación de envío.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotorcycleDraft {
    plate: String,
    pub model: String,
    pub zone: String,
    pub flags: StatusFlags,
    pub image: Option<String>,
}

impl MotorcycleDraft {
    pub fn new(
        raw_plate: &str,
        model: impl Into<String>,
        zone: impl Into<String>,
        status: MotorcycleStatus,
    ) -> Result<Self, PlateError> {
        let plate = validate_plate_for_submit(raw_plate)?;
        Ok(Self {
            plate,
            model: model.into(),
            zone: zone.into(),
            flags: status.flags(),
            image: None,
        })
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }
}

impl HasStatusFlags for MotorcycleDraft {
    fn mechanical_issue(&self) -> bool {
        self.flags.mechanical_issue
    }

    fn flagged(&self) -> bool {
        self.flags.flagged
    }
}

impl Serialize for MotorcycleDraft {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MotorcycleWire {
            placa: self.plate.clone(),
            modelo: self.model.clone(),
            zona: self.zone.clone(),
            falha_mecanica: self.flags.mechanical_issue,
            roubada: self.flags.flagged,
            multa: self.flags.flagged,
            imagem: self.image.clone(),
            created_at: None,
            updated_at: None,
        }
        .serialize(serializer)
    }
}

/// Request para actualizar una moto existente (todos los campos menos la placa)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotorcycleUpdate {
    pub model: Option<String>,
    pub zone: Option<String>,
    pub mechanical_issue: Option<bool>,
    pub flagged: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MotorcycleUpdateWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    modelo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zona: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    falha_mecanica: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roubada: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multa: Option<bool>,
}

impl MotorcycleUpdate {
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.zone.is_none()
            && self.mechanical_issue.is_none()
            && self.flagged.is_none()
    }

    /// Reemplazar ambas banderas según un estado seleccionado
    pub fn with_status(mut self, status: MotorcycleStatus) -> Self {
        let flags = status.flags();
        self.mechanical_issue = Some(flags.mechanical_issue);
        self.flagged = Some(flags.flagged);
        self
    }
}

impl Serialize for MotorcycleUpdate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MotorcycleUpdateWire {
            modelo: self.model.as_deref(),
            zona: self.zone.as_deref(),
            falha_mecanica: self.mechanical_issue,
            roubada: self.flagged,
            multa: self.flagged,
        }
        .serialize(serializer)
    }
}
