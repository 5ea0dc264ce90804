//! Repositorios
//!
//! `FleetStore` es el colaborador de persistencia del dominio. Los fallos
//! (red o base de datos) se propagan tal cual al llamador, sin reintentos.

use async_trait::async_trait;

use crate::models::trip::{NewTrip, Trip};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::AppResult;

pub mod http_store;
pub mod memory_store;
pub mod pg_store;
pub mod trip_repository;
pub mod vehicle_repository;

pub use http_store::HttpFleetStore;
pub use memory_store::InMemoryFleetStore;
pub use pg_store::PgFleetStore;

/// Operaciones de persistencia sobre las tablas vehicles y trips
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Vehículos, el más reciente primero
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// Trayectos, el de fecha más reciente primero
    async fn list_trips(&self) -> AppResult<Vec<Trip>>;

    /// Registrar un vehículo; matrícula repetida → `Conflict`
    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// Eliminar por id; id inexistente → `NotFound`
    async fn delete_vehicle(&self, id: i32) -> AppResult<()>;

    async fn create_trip(&self, trip: NewTrip) -> AppResult<Trip>;
}
