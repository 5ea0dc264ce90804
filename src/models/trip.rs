//! Modelo de Trip
//!
//! Un trayecto registra el combustible consumido y la medida (distancia u
//! horas) según el tipo del vehículo. Las columnas derivadas (`consumption`,
//! `status`) se calculan una sola vez al crear el trayecto.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Etiqueta almacenada para un consumo excesivo
pub const OVERAGE_LABEL: &str = "Dépassement";
/// Etiqueta almacenada para un consumo dentro del límite
pub const NORMAL_LABEL: &str = "Normal";

/// Veredicto de consumo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Dépassement", alias = "Overage")]
    Overage,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Normal => NORMAL_LABEL,
            TripStatus::Overage => OVERAGE_LABEL,
        }
    }

    /// Interpretación tolerante de la columna `status` (mayúsculas indiferentes)
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        if lowered == OVERAGE_LABEL.to_lowercase() {
            Some(TripStatus::Overage)
        } else if lowered == NORMAL_LABEL.to_lowercase() {
            Some(TripStatus::Normal)
        } else {
            None
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unidad del consumo calculado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumptionUnit {
    #[serde(rename = "L/100km")]
    LitersPer100Km,
    #[serde(rename = "L/H")]
    LitersPerHour,
}

impl ConsumptionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionUnit::LitersPer100Km => "L/100km",
            ConsumptionUnit::LitersPerHour => "L/H",
        }
    }
}

impl fmt::Display for ConsumptionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Medida de un trayecto, discriminada por el tipo de vehículo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TripMeasure {
    Distance { km: f64 },
    Duration { hours: f64 },
}

impl TripMeasure {
    pub fn distance(&self) -> Option<f64> {
        match self {
            TripMeasure::Distance { km } => Some(*km),
            TripMeasure::Duration { .. } => None,
        }
    }

    pub fn hours(&self) -> Option<f64> {
        match self {
            TripMeasure::Distance { .. } => None,
            TripMeasure::Duration { hours } => Some(*hours),
        }
    }
}

/// Trip persistido - mapea a la tabla trips
///
/// Todas las columnas numéricas y `status` son opcionales: registros
/// antiguos pueden no tenerlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: NaiveDate,
    pub distance: Option<f64>,
    pub hours: Option<f64>,
    pub fuel: Option<f64>,
    pub consumption: Option<f64>,
    pub status: Option<String>,
}

impl Trip {
    /// Veredicto almacenado, `None` si falta o no se reconoce
    pub fn verdict(&self) -> Option<TripStatus> {
        self.status.as_deref().and_then(TripStatus::parse_lenient)
    }

    pub fn is_overage(&self) -> bool {
        self.verdict() == Some(TripStatus::Overage)
    }
}

/// Trayecto calculado listo para persistir
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub vehicle_id: i32,
    pub date: NaiveDate,
    pub measure: TripMeasure,
    pub fuel: f64,
    pub consumption: f64,
    pub status: TripStatus,
}
