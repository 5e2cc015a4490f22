//! Repository layer for database operations

pub mod equipment_types;
pub mod floors;
pub mod segments;
pub mod utilization;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub floors: floors::FloorsRepository,
    pub equipment_types: equipment_types::EquipmentTypesRepository,
    pub utilization: utilization::UtilizationRepository,
    pub segments: segments::SegmentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            floors: floors::FloorsRepository::new(pool.clone()),
            equipment_types: equipment_types::EquipmentTypesRepository::new(pool.clone()),
            utilization: utilization::UtilizationRepository::new(pool.clone()),
            segments: segments::SegmentsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
