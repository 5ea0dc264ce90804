pub mod dashboard_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

/// Router de `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/trips", trip_routes::create_trip_router())
        .nest("/export", dashboard_routes::create_export_router())
        .merge(dashboard_routes::create_dashboard_router())
}
