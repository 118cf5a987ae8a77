use crate::models::RoomType;
use sqlx::PgPool;
use std::collections::BTreeMap;

pub struct RoomTypeRepository {
    pool: PgPool,
}

impl RoomTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<RoomType>, sqlx::Error> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    /// id -> type name, ordered by id
    pub async fn get_names(&self) -> Result<BTreeMap<i32, String>, sqlx::Error> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .map(|t| (t.id, t.type_name))
            .collect())
    }

    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM room_types WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
