use crate::models::Admin;
use sqlx::PgPool;

pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn admin_id_taken(&self, admin_id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM admins WHERE admin_id = $1)")
            .bind(admin_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, admin: &Admin) -> Result<Admin, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (admin_id, admin_name, email, password_hash, auth_key, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
        .bind(&admin.admin_id)
        .bind(&admin.admin_name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.auth_key)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, sqlx::Error> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query("UPDATE admins SET password_hash = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
