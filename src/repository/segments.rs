//! Floor segments repository (reads; writes go through the owning record)

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::floor_segment::FloorSegment};

#[derive(Clone)]
pub struct SegmentsRepository {
    pool: Pool<Postgres>,
}

impl SegmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Segments of a utilization record, in chronological order
    pub async fn list_for_record(&self, record_id: i32) -> AppResult<Vec<FloorSegment>> {
        let rows = sqlx::query_as::<_, FloorSegment>(
            r#"
            SELECT s.id, s.utilization_record_id, s.floor_id, f.name AS floor_name,
                   s.start_date, s.end_date
            FROM floor_segments s
            JOIN floors f ON f.id = s.floor_id
            WHERE s.utilization_record_id = $1
            ORDER BY s.start_date, s.id
            "#,
        )
        .bind(record_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
