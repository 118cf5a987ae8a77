use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle tag of an application, stored as `applications.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending = 0,
    Approved = 1,
}

impl ApplicationStatus {
    pub fn code(self) -> i16 {
        self as i16
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub room_id: i32,
    pub start_time: i64,
    pub end_time: i64,
    /// Raw status code. Codes other than pending/approved may exist in the table.
    pub status: i16,
}
