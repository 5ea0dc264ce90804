use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{AlertsResponse, NotificationsResponse};
use crate::services::consumption_engine::DashboardStats;
use crate::services::export_service::{TRIPS_FILENAME, VEHICLES_FILENAME};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/alerts", get(get_alerts))
        .route("/notifications", get(get_notifications))
}

pub fn create_export_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles.csv", get(export_vehicles))
        .route("/trips.csv", get(export_trips))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    Ok(Json(controller.stats().await?))
}

async fn get_alerts(State(state): State<AppState>) -> Result<Json<AlertsResponse>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    Ok(Json(controller.alerts().await?))
}

async fn get_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationsResponse>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    Ok(Json(controller.notifications().await?))
}

async fn export_vehicles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let controller = DashboardController::new(state.store.clone());
    let body = controller.export_vehicles().await?;
    Ok(csv_attachment(VEHICLES_FILENAME, body))
}

async fn export_trips(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let controller = DashboardController::new(state.store.clone());
    let body = controller.export_trips().await?;
    Ok(csv_attachment(TRIPS_FILENAME, body))
}

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}
