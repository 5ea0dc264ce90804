use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::common_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripCreatedResponse};
use crate::models::trip::{Trip, TripStatus};
use crate::repositories::FleetStore;
use crate::services::consumption_engine::{self, TripResult};
use crate::services::VehicleCatalog;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct TripController {
    store: Arc<dyn FleetStore>,
}

impl TripController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Trip>, AppError> {
        self.store.list_trips().await
    }

    /// Calcular sin persistir (vista previa del calculador)
    pub async fn calculate(&self, request: &CreateTripRequest) -> Result<TripResult, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        let vehicle = VehicleCatalog::new(&vehicles).find_by_id(request.vehicle_id)?;
        let result = consumption_engine::compute_trip(&request.readings, vehicle)?;

        if result.verdict == TripStatus::Overage {
            warn!(
                "⛽ Sobreconsumo {}: {:.2} {} > {}",
                vehicle.plate, result.rate, result.unit, vehicle.max_conso
            );
        }
        Ok(result)
    }

    /// Calcular y guardar; nada se persiste si el cálculo falla
    pub async fn create(
        &self,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<TripCreatedResponse>, AppError> {
        let date = trip_date(request.date.as_deref())?;
        let result = self.calculate(&request).await?;

        let trip = self
            .store
            .create_trip(result.clone().into_new_trip(date))
            .await?;
        info!(
            "💾 Trayecto {} guardado: vehículo {}, {:.2} {} ({})",
            trip.id, trip.vehicle_id, result.rate, result.unit, result.verdict
        );

        Ok(ApiResponse::success_with_message(
            TripCreatedResponse { trip, result },
            "Trip saved".to_string(),
        ))
    }
}

/// Fecha del trayecto; sin fecha se usa el día actual
fn trip_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => validate_date(value).map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("date", e);
            AppError::Validation(errors)
        }),
        None => Ok(Utc::now().date_naive()),
    }
}
