//! Equipment catalog service

use validator::Validate;

use crate::{
    error::AppResult,
    models::equipment_type::{CreateEquipmentType, EquipmentType, UpdateEquipmentType},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentTypesService {
    repository: Repository,
}

impl EquipmentTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.equipment_types.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentType> {
        self.repository.equipment_types.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        data.validate()?;
        let equipment = self.repository.equipment_types.create(data).await?;
        tracing::info!(
            equipment_type_id = equipment.id,
            name = %equipment.name,
            category = %equipment.category,
            "Equipment type created"
        );
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipmentType) -> AppResult<EquipmentType> {
        data.validate()?;
        let equipment = self.repository.equipment_types.update(id, data).await?;
        tracing::info!(equipment_type_id = id, "Equipment type updated");
        Ok(equipment)
    }

    /// Delete an equipment type; returns how many utilization records went with it
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let removed = self.repository.equipment_types.delete(id).await?;
        tracing::info!(equipment_type_id = id, records_removed = removed, "Equipment type deleted");
        Ok(removed)
    }
}
