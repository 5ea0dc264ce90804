//! Utilidades de validación
//!
//! Funciones helper para validación de datos de entrada y conversión de
//! tipos antes de llegar al dominio.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

use crate::models::vehicle::VehicleType;
use crate::utils::errors::AppError;

/// Crear un `AppError::Validation` para un único campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Validar y convertir string a fecha (`YYYY-MM-DD`)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que la etiqueta pertenezca al conjunto cerrado de tipos
pub fn validate_vehicle_type(value: &str) -> Result<(), ValidationError> {
    if VehicleType::from_label(value.trim()).is_none() {
        let mut error = ValidationError::new("vehicle_type");
        error.add_param("value".into(), &value.to_string());
        error.add_param(
            "allowed_values".into(),
            &VehicleType::ALL.iter().map(|t| t.label()).collect::<Vec<_>>(),
        );
        return Err(error);
    }
    Ok(())
}

/// Validar que un número sea finito y estrictamente positivo
pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        let mut error = ValidationError::new("positive");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Número leído de JSON o de texto tecleado en un formulario
///
/// Vacío o `null` → `None`; coma decimal aceptada; texto no numérico → NaN.
pub fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(text)) => {
            let text = text.trim().replace(',', ".");
            if text.is_empty() {
                None
            } else {
                Some(text.parse::<f64>().unwrap_or(f64::NAN))
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2025-08-18").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()
        );
        assert!(validate_date("18/08/2025").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Paul").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_vehicle_type() {
        assert!(validate_vehicle_type("Frigo").is_ok());
        assert!(validate_vehicle_type("Truck").is_ok());
        assert!(validate_vehicle_type("Moto").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(0.1).is_ok());
        assert!(validate_positive(0.0).is_err());
        assert!(validate_positive(-3.0).is_err());
        assert!(validate_positive(f64::NAN).is_err());
    }

    #[test]
    fn test_validation_error_targets_field() {
        match validation_error("maxConso", "must be positive") {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("maxConso"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
