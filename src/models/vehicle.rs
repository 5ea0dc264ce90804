//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el tipo cerrado de vehículo.
//! Mapea exactamente a la tabla `vehicles` (primary key `id` SERIAL).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Tipo de vehículo - conjunto cerrado, etiquetas en francés en BD y JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "Camion", alias = "Truck")]
    Truck,
    #[serde(rename = "Voiture", alias = "Car")]
    Car,
    #[serde(rename = "Fourgon", alias = "Van")]
    Van,
    #[serde(rename = "Frigo", alias = "Refrigerated")]
    Refrigerated,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Truck,
        VehicleType::Car,
        VehicleType::Van,
        VehicleType::Refrigerated,
    ];

    /// Etiqueta almacenada en la columna `type`
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Truck => "Camion",
            VehicleType::Car => "Voiture",
            VehicleType::Van => "Fourgon",
            VehicleType::Refrigerated => "Frigo",
        }
    }

    /// Acepta la etiqueta francesa o el nombre inglés, exactos
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Camion" | "Truck" => Some(VehicleType::Truck),
            "Voiture" | "Car" => Some(VehicleType::Car),
            "Fourgon" | "Van" => Some(VehicleType::Van),
            "Frigo" | "Refrigerated" => Some(VehicleType::Refrigerated),
            _ => None,
        }
    }

    /// Los frigoríficos se miden por horas de funcionamiento
    pub fn is_hour_based(&self) -> bool {
        matches!(self, VehicleType::Refrigerated)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vehicle principal - mapea a la tabla vehicles
///
/// `vehicle_type` se guarda como texto: filas antiguas pueden contener
/// etiquetas fuera del conjunto cerrado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub plate: String,
    pub company: String,
    pub driver: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub vehicle_type: String,
    pub max_conso: f64,
}

impl Vehicle {
    /// Tipo reconocido, `None` para etiquetas desconocidas
    pub fn kind(&self) -> Option<VehicleType> {
        VehicleType::from_label(&self.vehicle_type)
    }

    /// Vehículo medido por horas (solo `Frigo`); cualquier otra etiqueta usa distancia
    pub fn is_hour_based(&self) -> bool {
        self.kind().map(|k| k.is_hour_based()).unwrap_or(false)
    }
}

/// Datos validados para registrar un vehículo
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub plate: String,
    pub company: String,
    pub driver: String,
    pub vehicle_type: VehicleType,
    pub max_conso: f64,
}
