use serde::Deserialize;

use super::{max_chars, required, FieldErrors};
use crate::db::campus::CampusRepository;
use crate::db::room_type::RoomTypeRepository;
use crate::error::{AppError, AppResult};
use crate::models::room::{status_label, STATUS_AVAILABLE};
use crate::models::Room;

pub const ROOM_NUMBER_MAX_LEN: usize = 10;

/// Create/update payload for a room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomForm {
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<i32>,
    pub campus: Option<i32>,
    pub available: Option<i16>,
}

impl RoomForm {
    /// Rules that need no database. Returns the room (id 0) and whatever errors were found.
    pub fn check(&self) -> (Option<Room>, FieldErrors) {
        let mut errors = FieldErrors::default();

        let room_number = required(&mut errors, "room_number", "Room number", self.room_number.as_deref());
        if self.room_type.is_none() {
            errors.add("type", "Room type cannot be blank.");
        }
        if self.campus.is_none() {
            errors.add("campus", "Campus cannot be blank.");
        }
        if let Some(ref number) = room_number {
            max_chars(&mut errors, "room_number", "Room number", number, ROOM_NUMBER_MAX_LEN);
        }

        let available = self.available.unwrap_or(STATUS_AVAILABLE);
        if status_label(available).is_none() {
            errors.add("available", "Status is invalid.");
        }

        let room = match (room_number, self.room_type, self.campus) {
            (Some(room_number), Some(room_type), Some(campus)) => Some(Room {
                available,
                ..Room::new(room_number, room_type, campus)
            }),
            _ => None,
        };
        (room, errors)
    }

    /// Full validation, including that `type` and `campus` point at existing rows.
    pub async fn validate(
        &self,
        room_types: &RoomTypeRepository,
        campuses: &CampusRepository,
    ) -> AppResult<Room> {
        let (room, mut errors) = self.check();

        if let Some(room_type) = self.room_type {
            if !errors.has("type") && !room_types.exists(room_type).await? {
                errors.add("type", "Room type is invalid.");
            }
        }
        if let Some(campus) = self.campus {
            if !errors.has("campus") && !campuses.exists(campus).await? {
                errors.add("campus", "Campus is invalid.");
            }
        }

        match room {
            Some(room) if errors.is_empty() => Ok(room),
            _ => Err(AppError::Validation(errors)),
        }
    }
}
