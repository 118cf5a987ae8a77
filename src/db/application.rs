use crate::error::AppResult;
use crate::models::{Application, ApplicationStatus};
use crate::occupancy::ApplicationCounter;
use crate::window::TimeWindow;
use async_trait::async_trait;
use sqlx::PgPool;

/// `$1` room, `$2` status, `$3` window start, `$4` window end.
/// The WHERE clause is `TimeWindow::overlaps` written as "not disjoint"; keep the two in step.
const COUNT_OVERLAPPING_SQL: &str = "SELECT COUNT(*) FROM applications
     WHERE room_id = $1
       AND status = $2
       AND NOT (start_time >= $4 OR end_time <= $3)";

pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All applications filed against a room, earliest first
    pub async fn get_by_room(&self, room_id: i32) -> Result<Vec<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE room_id = $1 ORDER BY start_time, id"
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl ApplicationCounter for ApplicationRepository {
    async fn count_overlapping(
        &self,
        room_id: i32,
        window: TimeWindow,
        status: ApplicationStatus,
    ) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as(COUNT_OVERLAPPING_SQL)
            .bind(room_id)
            .bind(status.code())
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
