//! Almacén remoto
//!
//! Habla con la API REST del servidor (`/api/vehicles`, `/api/trips`). Lo usa
//! el cliente de consola para trabajar contra un backend ya desplegado.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::FleetStore;
use crate::dto::common_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripCreatedResponse};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::trip::{NewTrip, Trip, TripMeasure};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::services::consumption_engine::TripReadings;
use crate::utils::errors::{AppError, AppResult, ErrorResponse};

pub struct HttpFleetStore {
    base_url: String,
    client: Client,
}

impl HttpFleetStore {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        tracing::debug!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        read_json(response).await
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::ExternalApi(format!("Request failed: {}", e))
}

/// Decodificar el cuerpo, o traducir la respuesta de error del servidor
async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid response body: {}", e)));
    }

    Err(status_error(status, response).await)
}

async fn status_error(status: StatusCode, response: Response) -> AppError {
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    tracing::warn!("📡 Server answered {}: {}", status, message);

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        StatusCode::BAD_REQUEST => AppError::BadRequest(message),
        _ => AppError::ExternalApi(format!("{}: {}", status, message)),
    }
}

fn unwrap_data<T>(response: ApiResponse<T>) -> AppResult<T> {
    response
        .data
        .ok_or_else(|| AppError::ExternalApi("Response without data".to_string()))
}

#[async_trait]
impl FleetStore for HttpFleetStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.get_json("/api/vehicles").await
    }

    async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        self.get_json("/api/trips").await
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let request = CreateVehicleRequest {
            plate: vehicle.plate,
            company: vehicle.company,
            driver: vehicle.driver,
            vehicle_type: vehicle.vehicle_type.label().to_string(),
            max_conso: vehicle.max_conso,
        };

        let response = self
            .client
            .post(self.url("/api/vehicles"))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        unwrap_data(read_json::<ApiResponse<Vehicle>>(response).await?)
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/vehicles/{}", id)))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status, response).await)
        }
    }

    /// El servidor recalcula el veredicto a partir de la medida y el carburante
    async fn create_trip(&self, trip: NewTrip) -> AppResult<Trip> {
        let readings = match trip.measure {
            TripMeasure::Distance { km } => TripReadings::distance(km, trip.fuel),
            TripMeasure::Duration { hours } => TripReadings::duration(hours, trip.fuel),
        };
        let request = CreateTripRequest {
            vehicle_id: trip.vehicle_id,
            date: Some(trip.date.format("%Y-%m-%d").to_string()),
            readings,
        };

        let response = self
            .client
            .post(self.url("/api/trips"))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let created = unwrap_data(read_json::<ApiResponse<TripCreatedResponse>>(response).await?)?;
        Ok(created.trip)
    }
}
