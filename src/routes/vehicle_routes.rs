use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, PlateLookupQuery, VehicleQuery};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/lookup", get(lookup_vehicle))
        .route("/:id", get(get_vehicle).delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.list(query.search.as_deref()).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

/// Autocompletado: entrada vacía → 204 sin consultar el catálogo
async fn lookup_vehicle(
    State(state): State<AppState>,
    Query(query): Query<PlateLookupQuery>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let plate = query.plate.unwrap_or_default();

    match controller.lookup(&plate).await? {
        Some(vehicle) => Ok(Json(vehicle).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Deleted"
    })))
}
