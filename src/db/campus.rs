use crate::models::Campus;
use sqlx::PgPool;
use std::collections::BTreeMap;

pub struct CampusRepository {
    pool: PgPool,
}

impl CampusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Campus>, sqlx::Error> {
        sqlx::query_as::<_, Campus>("SELECT * FROM campuses ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    /// id -> campus name, ordered by id
    pub async fn get_names(&self) -> Result<BTreeMap<i32, String>, sqlx::Error> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.campus_name))
            .collect())
    }

    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM campuses WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
