//! Snapshot de flota
//!
//! Vehículos y trayectos cargados juntos para una operación. Todas las
//! llamadas al dominio reciben el mismo snapshot inmutable; refrescarlo tras
//! una mutación es responsabilidad del llamador.

use tracing::debug;

use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::repositories::FleetStore;
use crate::services::consumption_engine::{self, AlertDetail, DashboardStats};
use crate::services::vehicle_catalog::VehicleCatalog;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub trips: Vec<Trip>,
}

impl FleetSnapshot {
    /// Cargar vehículos y trayectos en paralelo
    pub async fn load(store: &dyn FleetStore) -> AppResult<Self> {
        let (vehicles, trips) = tokio::try_join!(store.list_vehicles(), store.list_trips())?;
        debug!("📸 Snapshot cargado: {} vehículos, {} trayectos", vehicles.len(), trips.len());
        Ok(Self { vehicles, trips })
    }

    pub fn catalog(&self) -> VehicleCatalog<'_> {
        VehicleCatalog::new(&self.vehicles)
    }

    pub fn dashboard(&self) -> DashboardStats {
        consumption_engine::aggregate(&self.trips, &self.vehicles)
    }

    pub fn alerts(&self) -> Vec<AlertDetail> {
        consumption_engine::resolve_alerts(&self.trips, &self.vehicles)
    }
}
