use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleType};
use crate::repositories::FleetStore;
use crate::services::VehicleCatalog;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_positive, validation_error};

pub struct VehicleController {
    store: Arc<dyn FleetStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if validate_positive(request.max_conso).is_err() {
            return Err(validation_error("maxConso", "maxConso must be a positive number"));
        }

        let vehicle_type = VehicleType::from_label(request.vehicle_type.trim())
            .ok_or_else(|| validation_error("type", "unknown vehicle type"))?;

        let new_vehicle = NewVehicle {
            plate: request.plate.trim().to_string(),
            company: request.company.trim().to_string(),
            driver: request.driver.trim().to_string(),
            vehicle_type,
            max_conso: request.max_conso,
        };

        let vehicle = self.store.create_vehicle(new_vehicle).await?;
        info!("🚗 Vehículo registrado: {} ({})", vehicle.plate, vehicle.vehicle_type);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Véhicule ajouté avec succès".to_string(),
        ))
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.store.list_vehicles().await?;

        match search {
            Some(term) => Ok(VehicleCatalog::new(&vehicles)
                .search(term)
                .into_iter()
                .cloned()
                .collect()),
            None => Ok(vehicles),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Vehicle, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        let vehicle = VehicleCatalog::new(&vehicles).find_by_id(id)?;
        Ok(vehicle.clone())
    }

    /// Autocompletado por prefijo; `None` si la entrada está vacía
    pub async fn lookup(&self, plate: &str) -> Result<Option<Vehicle>, AppError> {
        if plate.trim().is_empty() {
            return Ok(None);
        }

        let vehicles = self.store.list_vehicles().await?;
        let vehicle = VehicleCatalog::new(&vehicles).find_by_plate_prefix(plate)?;
        Ok(Some(vehicle.clone()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.store.delete_vehicle(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}
