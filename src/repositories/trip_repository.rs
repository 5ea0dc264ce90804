use sqlx::PgPool;

use crate::models::trip::{NewTrip, Trip};
use crate::utils::errors::AppError;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_trip: NewTrip) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (vehicle_id, date, distance, hours, fuel, consumption, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new_trip.vehicle_id)
        .bind(new_trip.date)
        .bind(new_trip.measure.distance())
        .bind(new_trip.measure.hours())
        .bind(new_trip.fuel)
        .bind(new_trip.consumption)
        .bind(new_trip.status.label())
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn find_all(&self) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }
}
