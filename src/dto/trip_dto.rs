use serde::{Deserialize, Serialize};

use crate::models::trip::Trip;
use crate::services::consumption_engine::{TripReadings, TripResult};

// Request del calculador: lecturas brutas + vehículo + fecha
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub vehicle_id: i32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub readings: TripReadings,
}

// Response al guardar un trayecto
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCreatedResponse {
    pub trip: Trip,
    pub result: TripResult,
}
