pub mod common_dto;
pub mod dashboard_dto;
pub mod trip_dto;
pub mod vehicle_dto;
