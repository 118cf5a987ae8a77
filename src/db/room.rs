use crate::models::Room;
use sqlx::PgPool;

pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create(&self, room: &Room) -> Result<Room, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (room_number, type, campus, available)
             VALUES ($1, $2, $3, $4)
             RETURNING *"
        )
        .bind(&room.room_number)
        .bind(room.room_type)
        .bind(room.campus)
        .bind(room.available)
        .fetch_one(&self.pool)
        .await
    }

    /// Returns `false` when no row has the room's id.
    pub async fn update(&self, room: &Room) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rooms
             SET room_number = $2, type = $3, campus = $4, available = $5
             WHERE id = $1"
        )
        .bind(room.id)
        .bind(&room.room_number)
        .bind(room.room_type)
        .bind(room.campus)
        .bind(room.available)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist only the availability flag. Concurrent writers: last one wins.
    pub async fn update_available(&self, id: i32, available: i16) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE rooms SET available = $2 WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
