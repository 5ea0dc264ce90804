use serde::{Deserialize, Serialize};

use crate::services::consumption_engine::AlertDetail;

// Detalle de alertas del tablero
#[derive(Debug, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub count: usize,
    pub alerts: Vec<AlertDetail>,
    pub report: String,
}

// Resumen de notificaciones
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub count: usize,
    pub message: String,
}
