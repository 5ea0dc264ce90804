pub mod dashboard_controller;
pub mod trip_controller;
pub mod vehicle_controller;
