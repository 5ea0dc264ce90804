//! Almacén PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;

use super::trip_repository::TripRepository;
use super::vehicle_repository::VehicleRepository;
use super::FleetStore;
use crate::models::trip::{NewTrip, Trip};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::AppResult;

pub struct PgFleetStore {
    vehicles: VehicleRepository,
    trips: TripRepository,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.find_all().await
    }

    async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        self.trips.find_all().await
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        self.vehicles.create(vehicle).await
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<()> {
        self.vehicles.delete(id).await
    }

    async fn create_trip(&self, trip: NewTrip) -> AppResult<Trip> {
        self.trips.create(trip).await
    }
}
