//! Almacén en memoria
//!
//! Reproduce el orden y las restricciones del esquema SQL (matrícula única,
//! ids secuenciales). Se usa en modo desarrollo (`STORAGE_BACKEND=memory`)
//! y en los tests.

use async_trait::async_trait;
use std::cmp::Reverse;
use tokio::sync::RwLock;

use super::FleetStore;
use crate::models::trip::{NewTrip, Trip};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Debug, Default)]
struct Tables {
    vehicles: Vec<Vehicle>,
    trips: Vec<Trip>,
    next_vehicle_id: i32,
    next_trip_id: i32,
}

#[derive(Debug, Default)]
pub struct InMemoryFleetStore {
    tables: RwLock<Tables>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precargar filas tal cual (registros antiguos incluidos)
    pub fn with_rows(vehicles: Vec<Vehicle>, trips: Vec<Trip>) -> Self {
        let next_vehicle_id = vehicles.iter().map(|v| v.id).max().unwrap_or(0);
        let next_trip_id = trips.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            tables: RwLock::new(Tables {
                vehicles,
                trips,
                next_vehicle_id,
                next_trip_id,
            }),
        }
    }
}

#[async_trait]
impl FleetStore for InMemoryFleetStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let mut vehicles = tables.vehicles.clone();
        vehicles.sort_by_key(|v| Reverse(v.id));
        Ok(vehicles)
    }

    async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        let tables = self.tables.read().await;
        let mut trips = tables.trips.clone();
        trips.sort_by_key(|t| Reverse((t.date, t.id)));
        Ok(trips)
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.iter().any(|v| v.plate == vehicle.plate) {
            return Err(conflict_error("Vehicle", "plate", &vehicle.plate));
        }

        tables.next_vehicle_id += 1;
        let created = Vehicle {
            id: tables.next_vehicle_id,
            plate: vehicle.plate,
            company: vehicle.company,
            driver: vehicle.driver,
            vehicle_type: vehicle.vehicle_type.label().to_string(),
            max_conso: vehicle.max_conso,
        };
        tables.vehicles.push(created.clone());
        Ok(created)
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        if tables.vehicles.len() == before {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        Ok(())
    }

    async fn create_trip(&self, trip: NewTrip) -> AppResult<Trip> {
        let mut tables = self.tables.write().await;
        tables.next_trip_id += 1;
        let created = Trip {
            id: tables.next_trip_id,
            vehicle_id: trip.vehicle_id,
            date: trip.date,
            distance: trip.measure.distance(),
            hours: trip.measure.hours(),
            fuel: Some(trip.fuel),
            consumption: Some(trip.consumption),
            status: Some(trip.status.label().to_string()),
        };
        tables.trips.push(created.clone());
        Ok(created)
    }
}
