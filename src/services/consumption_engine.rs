//! Motor de consumo
//!
//! Cálculo puro del consumo de un trayecto, veredicto frente al límite del
//! vehículo y agregados del tablero. Ninguna función hace I/O ni modifica
//! sus entradas.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::trip::{ConsumptionUnit, NewTrip, Trip, TripMeasure, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleType};
use crate::services::vehicle_catalog::VehicleCatalog;
use crate::utils::errors::DomainError;
use crate::utils::validation::deserialize_lenient_number;

/// Tamaño de la ventana de la serie reciente del tablero
pub const RECENT_SERIES_LEN: usize = 10;

/// Matrícula mostrada cuando el vehículo de un trayecto ya no existe
pub const UNKNOWN_VEHICLE: &str = "Unknown vehicle";

const FRENCH_MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// Lecturas brutas del calculador
///
/// `distance` / `hours` permiten pasar la diferencia ya calculada; si faltan
/// se derivan de los pares inicio/fin.
///
/// Los campos aceptan números o texto tecleado (`"12,5"`); el texto no
/// numérico llega como NaN y lo rechaza `compute_trip`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripReadings {
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub km_start: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub km_end: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub distance: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub hours_start: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub hours_end: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub hours: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub fuel: Option<f64>,
}

impl TripReadings {
    pub fn distance(km: f64, fuel: f64) -> Self {
        Self {
            distance: Some(km),
            fuel: Some(fuel),
            ..Self::default()
        }
    }

    pub fn duration(hours: f64, fuel: f64) -> Self {
        Self {
            hours: Some(hours),
            fuel: Some(fuel),
            ..Self::default()
        }
    }
}

/// Resultado de `compute_trip`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResult {
    pub vehicle_id: i32,
    pub measure: TripMeasure,
    pub fuel: f64,
    pub rate: f64,
    pub unit: ConsumptionUnit,
    pub max_conso: f64,
    pub verdict: TripStatus,
}

impl TripResult {
    pub fn into_new_trip(self, date: NaiveDate) -> NewTrip {
        NewTrip {
            vehicle_id: self.vehicle_id,
            date,
            measure: self.measure,
            fuel: self.fuel,
            consumption: self.rate,
            status: self.verdict,
        }
    }
}

/// Punto de la serie reciente (`"5 janv."`, litros)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub date: NaiveDate,
    pub fuel: f64,
}

/// Número de vehículos por tipo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    #[serde(rename = "Camion")]
    pub truck: usize,
    #[serde(rename = "Voiture")]
    pub car: usize,
    #[serde(rename = "Fourgon")]
    pub van: usize,
    #[serde(rename = "Frigo")]
    pub refrigerated: usize,
}

impl TypeDistribution {
    pub fn count(&self, kind: VehicleType) -> usize {
        match kind {
            VehicleType::Truck => self.truck,
            VehicleType::Car => self.car,
            VehicleType::Van => self.van,
            VehicleType::Refrigerated => self.refrigerated,
        }
    }

    fn increment(&mut self, kind: VehicleType) {
        match kind {
            VehicleType::Truck => self.truck += 1,
            VehicleType::Car => self.car += 1,
            VehicleType::Van => self.van += 1,
            VehicleType::Refrigerated => self.refrigerated += 1,
        }
    }
}

/// Cifras del tablero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub vehicle_count: usize,
    pub total_fuel: f64,
    pub total_trip_count: usize,
    pub alert_count: usize,
    pub recent_series: Vec<SeriesPoint>,
    pub type_distribution: TypeDistribution,
}

/// Detalle de una alerta de sobreconsumo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetail {
    pub trip_id: i32,
    pub plate: String,
    pub date: NaiveDate,
    pub consumption: Option<f64>,
}

/// Calcula consumo, unidad y veredicto de un trayecto.
///
/// La medida se elige por el tipo del vehículo: horas para `Frigo`,
/// distancia para el resto (incluidas etiquetas desconocidas).
pub fn compute_trip(readings: &TripReadings, vehicle: &Vehicle) -> Result<TripResult, DomainError> {
    let measure = measure_for(vehicle, readings)?;

    let fuel = match readings.fuel {
        Some(fuel) if fuel.is_finite() && fuel > 0.0 => fuel,
        Some(fuel) => {
            return Err(DomainError::InvalidInput(format!(
                "fuel must be a positive number, got {}",
                fuel
            )))
        }
        None => return Err(DomainError::InvalidInput("fuel is required".to_string())),
    };

    let (rate, unit) = match measure {
        TripMeasure::Duration { hours } => (fuel / hours, ConsumptionUnit::LitersPerHour),
        TripMeasure::Distance { km } => ((fuel / km) * 100.0, ConsumptionUnit::LitersPer100Km),
    };
    if !rate.is_finite() {
        return Err(DomainError::InvalidInput(format!(
            "consumption rate out of range for fuel {} over {:?}",
            fuel, measure
        )));
    }

    let verdict = if rate > vehicle.max_conso {
        TripStatus::Overage
    } else {
        TripStatus::Normal
    };

    Ok(TripResult {
        vehicle_id: vehicle.id,
        measure,
        fuel,
        rate,
        unit,
        max_conso: vehicle.max_conso,
        verdict,
    })
}

fn measure_for(vehicle: &Vehicle, readings: &TripReadings) -> Result<TripMeasure, DomainError> {
    if vehicle.is_hour_based() {
        let hours = positive_delta(readings.hours, readings.hours_start, readings.hours_end)
            .ok_or_else(|| DomainError::MissingInput("hours (start/end) are required".to_string()))?;
        Ok(TripMeasure::Duration { hours })
    } else {
        let km = positive_delta(readings.distance, readings.km_start, readings.km_end)
            .ok_or_else(|| DomainError::MissingInput("distance (km start/end) is required".to_string()))?;
        Ok(TripMeasure::Distance { km })
    }
}

/// Diferencia explícita o `end - start`; `None` si no es finita y positiva
fn positive_delta(explicit: Option<f64>, start: Option<f64>, end: Option<f64>) -> Option<f64> {
    let delta = match (explicit, start, end) {
        (Some(value), _, _) => value,
        (None, Some(start), Some(end)) => end - start,
        _ => return None,
    };
    (delta.is_finite() && delta > 0.0).then_some(delta)
}

/// Agregados del tablero sobre la colección completa de trayectos
pub fn aggregate(trips: &[Trip], vehicles: &[Vehicle]) -> DashboardStats {
    let total_fuel: f64 = trips.iter().map(fuel_or_zero).sum();
    let alert_count = trips.iter().filter(|t| t.is_overage()).count();

    let mut sorted: Vec<&Trip> = trips.iter().collect();
    sorted.sort_by_key(|t| t.date);
    let start = sorted.len().saturating_sub(RECENT_SERIES_LEN);
    let recent_series = sorted[start..]
        .iter()
        .map(|t| SeriesPoint {
            label: short_date(t.date),
            date: t.date,
            fuel: fuel_or_zero(t),
        })
        .collect();

    let mut type_distribution = TypeDistribution::default();
    for kind in vehicles.iter().filter_map(Vehicle::kind) {
        type_distribution.increment(kind);
    }

    DashboardStats {
        vehicle_count: vehicles.len(),
        total_fuel,
        total_trip_count: trips.len(),
        alert_count,
        recent_series,
        type_distribution,
    }
}

/// Trayectos en sobreconsumo con la matrícula resuelta
pub fn resolve_alerts(trips: &[Trip], vehicles: &[Vehicle]) -> Vec<AlertDetail> {
    let catalog = VehicleCatalog::new(vehicles);
    trips
        .iter()
        .filter(|t| t.is_overage())
        .map(|t| AlertDetail {
            trip_id: t.id,
            plate: catalog
                .find_by_id(t.vehicle_id)
                .map(|v| v.plate.clone())
                .unwrap_or_else(|_| UNKNOWN_VEHICLE.to_string()),
            date: t.date,
            consumption: t.consumption,
        })
        .collect()
}

/// Texto del resumen de notificaciones
pub fn alert_report(alerts: &[AlertDetail]) -> String {
    if alerts.is_empty() {
        return "🔔 NOTIFICATIONS\n\nAucune nouvelle notification.\nTout est calme pour le moment.".to_string();
    }

    let header = format!("🔔 ALERTES DE SURCONSOMMATION ({})\n\n", alerts.len());
    alert_lines(header, alerts)
}

/// Texto del detalle de alertas (tarjeta de alertas del tablero)
pub fn alert_details_report(alerts: &[AlertDetail]) -> String {
    if alerts.is_empty() {
        return "✅ Aucune alerte de surconsommation pour le moment.".to_string();
    }

    let header = format!("⚠️ DÉTAILS DES ALERTES ({})\n\n", alerts.len());
    alert_lines(header, alerts)
}

fn alert_lines(mut report: String, alerts: &[AlertDetail]) -> String {
    for alert in alerts {
        let conso = alert
            .consumption
            .map(|c| format!("{:.1}", c))
            .unwrap_or_else(|| "-".to_string());
        report.push_str(&format!(
            "- {} le {} (Conso: {})\n",
            alert.plate,
            alert.date.format("%d/%m/%Y"),
            conso
        ));
    }
    report
}

/// Fecha corta al estilo `fr-FR` (`"5 janv."`)
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}", date.day(), FRENCH_MONTHS_SHORT[date.month0() as usize])
}

fn fuel_or_zero(trip: &Trip) -> f64 {
    trip.fuel.filter(|f| f.is_finite()).unwrap_or(0.0)
}
