//! Catálogo de vehículos
//!
//! Búsquedas de solo lectura sobre la lista de vehículos de un snapshot:
//! autocompletado por prefijo de matrícula, búsqueda por id y filtro de flota.

use crate::models::vehicle::Vehicle;
use crate::utils::errors::DomainError;

/// Vista de solo lectura sobre los vehículos de un snapshot
#[derive(Debug, Clone, Copy)]
pub struct VehicleCatalog<'a> {
    vehicles: &'a [Vehicle],
}

impl<'a> VehicleCatalog<'a> {
    pub fn new(vehicles: &'a [Vehicle]) -> Self {
        Self { vehicles }
    }

    /// Primer vehículo cuya matrícula empieza por `input` (sin distinguir mayúsculas).
    ///
    /// Con varias coincidencias gana la primera en el orden del catálogo.
    /// Una entrada vacía no coincide con nada.
    pub fn find_by_plate_prefix(&self, input: &str) -> Result<&'a Vehicle, DomainError> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Err(DomainError::NotFound("empty plate input".to_string()));
        }

        self.vehicles
            .iter()
            .find(|v| v.plate.to_lowercase().starts_with(&needle))
            .ok_or_else(|| DomainError::NotFound(format!("no vehicle with plate starting with '{}'", input.trim())))
    }

    pub fn find_by_id(&self, id: i32) -> Result<&'a Vehicle, DomainError> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("vehicle with id '{}'", id)))
    }

    /// Filtro de flota: matrícula, conductor o empresa contienen el término
    pub fn search(&self, term: &str) -> Vec<&'a Vehicle> {
        let term = term.trim().to_lowercase();
        self.vehicles
            .iter()
            .filter(|v| {
                term.is_empty()
                    || v.plate.to_lowercase().contains(&term)
                    || v.driver.to_lowercase().contains(&term)
                    || v.company.to_lowercase().contains(&term)
            })
            .collect()
    }
}
