//! Utilization records repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_constraint_violation, AppError, AppResult},
    models::{
        floor_segment::SegmentChanges,
        report::{ActiveFilter, HistoryFilter, HistorySort, RecordQuery},
        utilization::{CreateUtilizationRecord, UtilizationRecord},
    },
};

const SELECT_RECORDS: &str = r#"
    SELECT r.id, r.equipment_type_id, e.name AS equipment_name,
           r.floor_id, f.name AS floor_name,
           r.start_date, r.end_date, r.daily_cost, r.ownership_type
    FROM utilization_records r
    JOIN equipment_types e ON e.id = r.equipment_type_id
    JOIN floors f ON f.id = r.floor_id
"#;

/// Escape LIKE wildcards so user input matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[derive(Clone)]
pub struct UtilizationRepository {
    pool: Pool<Postgres>,
}

impl UtilizationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Active records (no end date) matching every supplied filter
    pub async fn list_active(&self, filter: &ActiveFilter) -> AppResult<Vec<UtilizationRecord>> {
        let mut conditions = vec!["r.end_date IS NULL".to_string()];
        let mut idx = 1;

        if filter.floor.is_some() {
            conditions.push(format!("f.name = ${}", idx));
            idx += 1;
        }
        if filter.equipment.is_some() {
            conditions.push(format!("e.name = ${}", idx));
        }

        let query = format!(
            "{} WHERE {} ORDER BY r.id",
            SELECT_RECORDS,
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, UtilizationRecord>(&query);
        if let Some(ref floor) = filter.floor {
            builder = builder.bind(floor);
        }
        if let Some(ref equipment) = filter.equipment {
            builder = builder.bind(equipment);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Ended records matching every supplied filter.
    ///
    /// Rows come back ordered by end date; cost ordering is applied by the caller
    /// since total cost is not a column.
    pub async fn list_history(&self, filter: &HistoryFilter) -> AppResult<Vec<UtilizationRecord>> {
        let mut conditions = vec!["r.end_date IS NOT NULL".to_string()];
        let mut idx = 1;

        macro_rules! add_condition {
            ($field:expr, $clause:literal) => {
                if $field.is_some() {
                    conditions.push(format!($clause, idx));
                    idx += 1;
                }
            };
        }

        add_condition!(filter.floor, "f.name = ${}");
        add_condition!(filter.equipment, "e.name = ${}");
        add_condition!(filter.from_date, "r.end_date >= ${}");
        add_condition!(filter.to_date, "r.end_date <= ${}");
        add_condition!(filter.ownership, "r.ownership_type = ${}");

        let order = match filter.sort() {
            HistorySort::EndDateAsc => "r.end_date ASC, r.id ASC",
            _ => "r.end_date DESC, r.id DESC",
        };

        let query = format!(
            "{} WHERE {} ORDER BY {}",
            SELECT_RECORDS,
            conditions.join(" AND "),
            order
        );

        let mut builder = sqlx::query_as::<_, UtilizationRecord>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(filter.floor);
        bind_field!(filter.equipment);
        bind_field!(filter.from_date);
        bind_field!(filter.to_date);
        bind_field!(filter.ownership);

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Every record, newest first, for administration
    pub async fn search(&self, query: &RecordQuery) -> AppResult<Vec<UtilizationRecord>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.search.is_some() {
            conditions.push(format!("(e.name ILIKE ${0} OR f.name ILIKE ${0})", idx));
            idx += 1;
        }
        if query.floor.is_some() {
            conditions.push(format!("f.name = ${}", idx));
            idx += 1;
        }
        if query.equipment.is_some() {
            conditions.push(format!("e.name = ${}", idx));
            idx += 1;
        }
        if query.ownership.is_some() {
            conditions.push(format!("r.ownership_type = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("{} {} ORDER BY r.id DESC", SELECT_RECORDS, where_clause);

        let mut builder = sqlx::query_as::<_, UtilizationRecord>(&sql);
        if let Some(ref term) = query.search {
            builder = builder.bind(like_pattern(term));
        }
        if let Some(ref floor) = query.floor {
            builder = builder.bind(floor);
        }
        if let Some(ref equipment) = query.equipment {
            builder = builder.bind(equipment);
        }
        if let Some(ownership) = query.ownership {
            builder = builder.bind(ownership);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<UtilizationRecord> {
        let query = format!("{} WHERE r.id = $1", SELECT_RECORDS);
        sqlx::query_as::<_, UtilizationRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Utilization record {} not found", id)))
    }

    /// Insert a record and return its id
    pub async fn create(&self, data: &CreateUtilizationRecord) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO utilization_records
                (equipment_type_id, floor_id, start_date, end_date, daily_cost, ownership_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(data.equipment_type_id)
        .bind(data.floor_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.daily_cost)
        .bind(data.ownership_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_violation)
    }

    /// Write the record fields and its segment changes in one transaction
    pub async fn save_with_segments(
        &self,
        id: i32,
        data: &CreateUtilizationRecord,
        changes: &SegmentChanges,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE utilization_records
            SET equipment_type_id = $1, floor_id = $2, start_date = $3,
                end_date = $4, daily_cost = $5, ownership_type = $6
            WHERE id = $7
            "#,
        )
        .bind(data.equipment_type_id)
        .bind(data.floor_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.daily_cost)
        .bind(data.ownership_type)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Utilization record {} not found", id)));
        }

        for segment_id in &changes.remove {
            sqlx::query("DELETE FROM floor_segments WHERE id = $1 AND utilization_record_id = $2")
                .bind(segment_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        for segment in &changes.keep {
            match segment.id {
                Some(segment_id) => {
                    let updated = sqlx::query(
                        r#"
                        UPDATE floor_segments
                        SET floor_id = $1, start_date = $2, end_date = $3
                        WHERE id = $4 AND utilization_record_id = $5
                        "#,
                    )
                    .bind(segment.floor_id)
                    .bind(segment.start_date)
                    .bind(segment.end_date)
                    .bind(segment_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_constraint_violation)?;

                    if updated.rows_affected() == 0 {
                        return Err(AppError::NotFound(format!(
                            "Floor segment {} not found on utilization record {}",
                            segment_id, id
                        )));
                    }
                }
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO floor_segments (utilization_record_id, floor_id, start_date, end_date)
                        VALUES ($1, $2, $3, $4)
                        "#,
                    )
                    .bind(id)
                    .bind(segment.floor_id)
                    .bind(segment.start_date)
                    .bind(segment.end_date)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_constraint_violation)?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a record; its floor segments go with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM utilization_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Utilization record {} not found", id)));
        }
        Ok(())
    }
}
