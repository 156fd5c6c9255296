//! Validación de placas
//!
//! Acepta los dos formatos vigentes: antiguo (`ABC1234`) y Mercosul
//! (`ABC1D23`). La entrada sólo se pasa a mayúsculas; los espacios no se
//! recortan, así que una placa con espacios falla el formato.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Longitud exacta de una placa completa
pub const PLATE_LENGTH: usize = 7;

lazy_static! {
    static ref LEGACY_PLATE: Regex =
        Regex::new(r"^[A-Z]{3}[0-9]{4}$").expect("legacy plate regex");
    static ref MERCOSUL_PLATE: Regex =
        Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").expect("mercosul plate regex");
}

/// Formato reconocido de una placa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateFormat {
    Legacy,
    Mercosul,
}

/// Motivo por el que una placa no es aceptada
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlateError {
    #[error("Por favor, insira a placa da moto.")]
    Missing,

    #[error("Placa incompleta: {length} de 7 caracteres.")]
    Incomplete { length: usize },

    #[error("Placa inválida. Use o formato ABC1234 ou ABC1D23.")]
    InvalidFormat,
}

/// Resultado estructurado de la validación; nunca se lanza un error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateValidation {
    pub normalized: String,
    pub valid: bool,
    pub format: Option<PlateFormat>,
    pub reason: Option<PlateError>,
}

fn normalize(raw: &str) -> String {
    raw.to_uppercase()
}

/// Detectar el formato de una placa ya normalizada
pub fn detect_format(normalized: &str) -> Option<PlateFormat> {
    if normalized.chars().count() != PLATE_LENGTH {
        return None;
    }
    if LEGACY_PLATE.is_match(normalized) {
        Some(PlateFormat::Legacy)
    } else if MERCOSUL_PLATE.is_match(normalized) {
        Some(PlateFormat::Mercosul)
    } else {
        None
    }
}

/// Validación completa de una placa
pub fn validate_plate(raw: &str) -> PlateValidation {
    let normalized = normalize(raw);

    let (format, reason) = if normalized.trim().is_empty() {
        (None, Some(PlateError::Missing))
    } else {
        let length = normalized.chars().count();
        if length != PLATE_LENGTH {
            (None, Some(PlateError::Incomplete { length }))
        } else {
            match detect_format(&normalized) {
                Some(format) => (Some(format), None),
                None => (None, Some(PlateError::InvalidFormat)),
            }
        }
    };

    PlateValidation {
        valid: reason.is_none(),
        normalized,
        format,
        reason,
    }
}

/// Chequeo de envío: longitud 7 y formato reconocido
pub fn is_complete_and_valid(raw: &str) -> bool {
    detect_format(&normalize(raw)).is_some()
}

/// Error a mostrar mientras el usuario escribe.
///
/// Sólo se reporta un error de formato cuando la entrada llega a 7
/// caracteres; antes de eso no hay nada que mostrar.
pub fn format_error_for_partial_input(raw: &str) -> Option<PlateError> {
    let normalized = normalize(raw);
    if normalized.chars().count() == PLATE_LENGTH && detect_format(&normalized).is_none() {
        Some(PlateError::InvalidFormat)
    } else {
        None
    }
}

/// Validación al guardar un registro; devuelve la placa normalizada
pub fn validate_plate_for_submit(raw: &str) -> Result<String, PlateError> {
    let validation = validate_plate(raw);
    match validation.reason {
        None => Ok(validation.normalized),
        Some(reason) => Err(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_is_normalized() {
        let result = validate_plate("abc1234");
        assert_eq!(result.normalized, "ABC1234");
        assert!(result.valid);
        assert_eq!(result.format, Some(PlateFormat::Legacy));
        assert_eq!(result.reason, None);
    }

    #[test]
    fn test_mercosul_plates() {
        assert_eq!(validate_plate("ABC1D23").format, Some(PlateFormat::Mercosul));
        assert_eq!(validate_plate("bra2e19").format, Some(PlateFormat::Mercosul));
        assert!(is_complete_and_valid("ABC1D23"));
    }

    #[test]
    fn test_short_plate_is_incomplete_not_format_error() {
        let result = validate_plate("AB1234");
        assert!(!result.valid);
        assert_eq!(result.reason, Some(PlateError::Incomplete { length: 6 }));
        assert_eq!(format_error_for_partial_input("AB1234"), None);
        assert!(!is_complete_and_valid("AB1234"));
    }

    #[test]
    fn test_wrong_length_never_valid() {
        for raw in ["", "A", "ABC123", "ABC12345", "ABCD1234", "ABC1D234"] {
            assert!(!is_complete_and_valid(raw), "{raw} should not be valid");
            assert_eq!(format_error_for_partial_input(raw), None);
        }
    }

    #[test]
    fn test_seven_chars_without_format() {
        for raw in ["1234ABC", "ABCDEFG", "AB12345", "ABC1DD3"] {
            let result = validate_plate(raw);
            assert!(!result.valid);
            assert_eq!(result.reason, Some(PlateError::InvalidFormat));
            assert_eq!(format_error_for_partial_input(raw), Some(PlateError::InvalidFormat));
        }
    }

    #[test]
    fn test_spaces_are_not_trimmed() {
        assert!(!is_complete_and_valid("ABC 123"));
        assert_eq!(format_error_for_partial_input("ABC 123"), Some(PlateError::InvalidFormat));
        assert_eq!(
            validate_plate("ABC1234 ").reason,
            Some(PlateError::Incomplete { length: 8 })
        );
    }

    #[test]
    fn test_blank_is_missing() {
        assert_eq!(validate_plate("").reason, Some(PlateError::Missing));
        assert_eq!(validate_plate("   ").reason, Some(PlateError::Missing));
        assert_eq!(validate_plate_for_submit("  "), Err(PlateError::Missing));
    }

    #[test]
    fn test_submit_returns_normalized_plate() {
        assert_eq!(validate_plate_for_submit("abc1d23"), Ok("ABC1D23".to_string()));
        assert_eq!(
            validate_plate_for_submit("ABC12"),
            Err(PlateError::Incomplete { length: 5 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlateError::InvalidFormat.to_string(),
            "Placa inválida. Use o formato ABC1234 ou ABC1D23."
        );
        assert_eq!(PlateError::Missing.to_string(), "Por favor, insira a placa da moto.");
    }
}
