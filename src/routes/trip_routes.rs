use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripCreatedResponse};
use crate::models::trip::Trip;
use crate::services::consumption_engine::TripResult;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/calculate", post(calculate_trip))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    let controller = TripController::new(state.store.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn calculate_trip(
    State(state): State<AppState>,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<Json<TripResult>, AppError> {
    let Json(request) = payload?;
    let controller = TripController::new(state.store.clone());
    let response = controller.calculate(&request).await?;
    Ok(Json(response))
}

async fn create_trip(
    State(state): State<AppState>,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TripCreatedResponse>>), AppError> {
    let Json(request) = payload?;
    let controller = TripController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
