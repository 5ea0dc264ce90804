//! Services module
//!
//! Este módulo contiene la lógica de negocio: el catálogo de vehículos, el
//! motor de consumo y la exportación. Los servicios trabajan sobre un
//! `FleetSnapshot` y no hacen I/O salvo la carga del propio snapshot.

pub mod consumption_engine;
pub mod export_service;
pub mod fleet_snapshot;
pub mod vehicle_catalog;

pub use consumption_engine::*;
pub use fleet_snapshot::FleetSnapshot;
pub use vehicle_catalog::VehicleCatalog;
