use sqlx::PgPool;
use tracing::debug;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

/// Código SQLSTATE de violación de unicidad
const UNIQUE_VIOLATION: &str = "23505";

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (plate, company, driver, type, max_conso)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new_vehicle.plate)
        .bind(&new_vehicle.company)
        .bind(&new_vehicle.driver)
        .bind(new_vehicle.vehicle_type.label())
        .bind(new_vehicle.max_conso)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(vehicle) => Ok(vehicle),
            Err(e) if is_unique_violation(&e) => {
                Err(conflict_error("Vehicle", "plate", &new_vehicle.plate))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        debug!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
