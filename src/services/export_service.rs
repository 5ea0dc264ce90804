//! Exportación CSV
//!
//! Genera los ficheros `flotte_gasoil.csv` y `trajets_gasoil.csv` con las
//! cabeceras en francés que espera el frontend.

use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::services::consumption_engine::UNKNOWN_VEHICLE;
use crate::services::vehicle_catalog::VehicleCatalog;
use crate::utils::errors::{AppError, AppResult};

pub const VEHICLES_FILENAME: &str = "flotte_gasoil.csv";
pub const TRIPS_FILENAME: &str = "trajets_gasoil.csv";

const VEHICLE_HEADERS: [&str; 5] = ["Matricule", "Societe", "Chauffeur", "Type", "MaxConso"];
const TRIP_HEADERS: [&str; 5] = ["Date", "Matricule", "Conso", "Carburant", "Statut"];

/// Lista de vehículos en CSV
pub fn vehicles_csv(vehicles: &[Vehicle]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(VEHICLE_HEADERS).map_err(csv_error)?;

    for v in vehicles {
        let max_conso = v.max_conso.to_string();
        writer
            .write_record([
                v.plate.as_str(),
                v.company.as_str(),
                v.driver.as_str(),
                v.vehicle_type.as_str(),
                max_conso.as_str(),
            ])
            .map_err(csv_error)?;
    }

    finish(writer)
}

/// Historial de trayectos en CSV, con la matrícula resuelta
pub fn trips_csv(trips: &[Trip], vehicles: &[Vehicle]) -> AppResult<String> {
    let catalog = VehicleCatalog::new(vehicles);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TRIP_HEADERS).map_err(csv_error)?;

    for t in trips {
        let plate = catalog
            .find_by_id(t.vehicle_id)
            .map(|v| v.plate.as_str())
            .unwrap_or(UNKNOWN_VEHICLE);
        writer
            .write_record([
                t.date.format("%Y-%m-%d").to_string(),
                plate.to_string(),
                optional_number(t.consumption),
                optional_number(t.fuel),
                t.status.clone().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    finish(writer)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Error finalizando CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV no es UTF-8: {}", e)))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("Error escribiendo CSV: {}", e))
}
