//! Floors service

use validator::Validate;

use crate::{
    error::AppResult,
    models::floor::{Floor, FloorPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct FloorsService {
    repository: Repository,
}

impl FloorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Floor>> {
        self.repository.floors.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Floor> {
        self.repository.floors.get_by_id(id).await
    }

    pub async fn create(&self, data: &FloorPayload) -> AppResult<Floor> {
        data.validate()?;
        let floor = self.repository.floors.create(data).await?;
        tracing::info!(floor_id = floor.id, name = %floor.name, "Floor created");
        Ok(floor)
    }

    pub async fn update(&self, id: i32, data: &FloorPayload) -> AppResult<Floor> {
        data.validate()?;
        let floor = self.repository.floors.update(id, data).await?;
        tracing::info!(floor_id = id, name = %floor.name, "Floor renamed");
        Ok(floor)
    }

    /// Delete a floor; returns how many utilization records went with it
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let removed = self.repository.floors.delete(id).await?;
        tracing::info!(floor_id = id, records_removed = removed, "Floor deleted");
        Ok(removed)
    }
}
