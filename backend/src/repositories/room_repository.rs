//! Database repository for room records.
//!
//! Rooms are read-only here; they are managed outside this service.

use crate::database::models::Room;
use anyhow::Result;
use sqlx::SqlitePool;

/// Repository for room database operations.
pub struct RoomRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> RoomRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Retrieves a room by its unique identifier.
    pub async fn get_room_by_id(&self, id: i64) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(room)
    }

    /// Retrieves every room, in insertion order.
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rooms)
    }
}
