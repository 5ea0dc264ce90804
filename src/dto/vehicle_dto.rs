use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_not_empty, validate_vehicle_type};

// Request para registrar un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub plate: String,

    #[validate(custom = "validate_not_empty")]
    pub company: String,

    #[validate(custom = "validate_not_empty")]
    pub driver: String,

    #[serde(rename = "type")]
    #[validate(custom = "validate_vehicle_type")]
    pub vehicle_type: String,

    pub max_conso: f64,
}

// Filtro del listado de flota
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    pub search: Option<String>,
}

// Autocompletado por matrícula
#[derive(Debug, Default, Deserialize)]
pub struct PlateLookupQuery {
    pub plate: Option<String>,
}
