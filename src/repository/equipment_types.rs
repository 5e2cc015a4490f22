//! Equipment catalog repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_constraint_violation, AppError, AppResult},
    models::equipment_type::{CreateEquipmentType, EquipmentType, UpdateEquipmentType},
};

#[derive(Clone)]
pub struct EquipmentTypesRepository {
    pool: Pool<Postgres>,
}

impl EquipmentTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment types
    pub async fn list(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>(
            "SELECT id, name, category, owned_quantity FROM equipment_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment type by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>(
            "SELECT id, name, category, owned_quantity FROM equipment_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    pub async fn create(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>(
            r#"
            INSERT INTO equipment_types (name, category, owned_quantity)
            VALUES ($1, $2, $3)
            RETURNING id, name, category, owned_quantity
            "#,
        )
        .bind(data.name.trim())
        .bind(data.category)
        .bind(data.owned_quantity.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_violation)
    }

    /// Update only the supplied fields
    pub async fn update(&self, id: i32, data: &UpdateEquipmentType) -> AppResult<EquipmentType> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category, "category");
        add_field!(data.owned_quantity, "owned_quantity");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE equipment_types SET {} WHERE id = ${} RETURNING id, name, category, owned_quantity",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, EquipmentType>(&query);

        if let Some(ref name) = data.name {
            builder = builder.bind(name.trim().to_string());
        }
        if let Some(category) = data.category {
            builder = builder.bind(category);
        }
        if let Some(quantity) = data.owned_quantity {
            builder = builder.bind(quantity);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_violation)?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    /// Delete an equipment type and, by cascade, every utilization record of it.
    ///
    /// Returns the number of utilization records removed by the cascade.
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let cascaded: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM utilization_records WHERE equipment_type_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM equipment_types WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment type {} not found", id)));
        }

        tx.commit().await?;
        Ok(cascaded)
    }
}
