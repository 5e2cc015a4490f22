//! Floors repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_constraint_violation, AppError, AppResult},
    models::floor::{Floor, FloorPayload},
};

#[derive(Clone)]
pub struct FloorsRepository {
    pool: Pool<Postgres>,
}

impl FloorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all floors ordered by name
    pub async fn list(&self) -> AppResult<Vec<Floor>> {
        let rows = sqlx::query_as::<_, Floor>("SELECT id, name FROM floors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get floor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Floor> {
        sqlx::query_as::<_, Floor>("SELECT id, name FROM floors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Floor {} not found", id)))
    }

    pub async fn create(&self, data: &FloorPayload) -> AppResult<Floor> {
        sqlx::query_as::<_, Floor>("INSERT INTO floors (name) VALUES ($1) RETURNING id, name")
            .bind(data.name.trim())
            .fetch_one(&self.pool)
            .await
            .map_err(map_constraint_violation)
    }

    pub async fn update(&self, id: i32, data: &FloorPayload) -> AppResult<Floor> {
        sqlx::query_as::<_, Floor>("UPDATE floors SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(data.name.trim())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_violation)?
            .ok_or_else(|| AppError::NotFound(format!("Floor {} not found", id)))
    }

    /// Delete a floor together with every utilization record and segment on it.
    ///
    /// Returns the number of utilization records removed by the cascade.
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let cascaded: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM utilization_records WHERE floor_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM floors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Floor {} not found", id)));
        }

        tx.commit().await?;
        Ok(cascaded)
    }
}
