use std::sync::Arc;

use crate::dto::dashboard_dto::{AlertsResponse, NotificationsResponse};
use crate::repositories::FleetStore;
use crate::services::consumption_engine::{alert_details_report, alert_report, DashboardStats};
use crate::services::export_service;
use crate::services::FleetSnapshot;
use crate::utils::errors::AppError;

pub struct DashboardController {
    store: Arc<dyn FleetStore>,
}

impl DashboardController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    async fn snapshot(&self) -> Result<FleetSnapshot, AppError> {
        FleetSnapshot::load(self.store.as_ref()).await
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        Ok(self.snapshot().await?.dashboard())
    }

    pub async fn alerts(&self) -> Result<AlertsResponse, AppError> {
        let alerts = self.snapshot().await?.alerts();
        Ok(AlertsResponse {
            count: alerts.len(),
            report: alert_details_report(&alerts),
            alerts,
        })
    }

    pub async fn notifications(&self) -> Result<NotificationsResponse, AppError> {
        let alerts = self.snapshot().await?.alerts();
        Ok(NotificationsResponse {
            count: alerts.len(),
            message: alert_report(&alerts),
        })
    }

    pub async fn export_vehicles(&self) -> Result<String, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        export_service::vehicles_csv(&vehicles)
    }

    pub async fn export_trips(&self) -> Result<String, AppError> {
        let snapshot = self.snapshot().await?;
        export_service::trips_csv(&snapshot.trips, &snapshot.vehicles)
    }
}
