use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Stored value of `rooms.available` for a room that can be booked.
pub const STATUS_AVAILABLE: i16 = 1;
/// Stored value of `rooms.available` for a room taken out of service.
pub const STATUS_UNAVAILABLE: i16 = 0;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: i32,
    pub room_number: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub room_type: i32,
    pub campus: i32,
    pub available: i16,
}

impl Room {
    pub fn new(room_number: String, room_type: i32, campus: i32) -> Self {
        Self {
            id: 0, // Will be set by database
            room_number,
            room_type,
            campus,
            available: STATUS_AVAILABLE,
        }
    }

    pub fn status_label(&self) -> Option<&'static str> {
        status_label(self.available)
    }

    pub fn status_style(&self) -> Option<StatusStyle> {
        status_style(self.available)
    }

    /// Flip the availability flag in memory. Persisting it is the caller's job.
    pub fn change_status(&mut self) {
        self.available = toggle(self.available);
    }
}

/// Display style attached to a status, rendered as a background class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusStyle {
    #[serde(rename = "bg-success")]
    Success,
    #[serde(rename = "bg-danger")]
    Danger,
}

/// A label paired with its display style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub style: StatusStyle,
}

pub fn status_label(available: i16) -> Option<&'static str> {
    match available {
        STATUS_AVAILABLE => Some("available"),
        STATUS_UNAVAILABLE => Some("unavailable"),
        _ => None,
    }
}

pub fn status_style(available: i16) -> Option<StatusStyle> {
    match available {
        STATUS_AVAILABLE => Some(StatusStyle::Success),
        STATUS_UNAVAILABLE => Some(StatusStyle::Danger),
        _ => None,
    }
}

/// Anything that is not AVAILABLE flips to AVAILABLE.
pub fn toggle(available: i16) -> i16 {
    if available == STATUS_AVAILABLE {
        STATUS_UNAVAILABLE
    } else {
        STATUS_AVAILABLE
    }
}

/// Every valid flag with its label, for select boxes and filters.
pub fn all_statuses() -> BTreeMap<i16, &'static str> {
    [STATUS_AVAILABLE, STATUS_UNAVAILABLE]
        .into_iter()
        .filter_map(|flag| status_label(flag).map(|label| (flag, label)))
        .collect()
}

/// Classify a room by how many approved applications overlap a window.
pub fn approval_descriptor(approved_count: i64) -> StatusDescriptor {
    if approved_count > 0 {
        StatusDescriptor { label: "assigned", style: StatusStyle::Danger }
    } else {
        StatusDescriptor { label: "unassigned", style: StatusStyle::Success }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(STATUS_AVAILABLE), Some("available"));
        assert_eq!(status_label(STATUS_UNAVAILABLE), Some("unavailable"));
        assert_eq!(status_label(2), None);
        assert_eq!(status_label(-1), None);
    }

    #[test]
    fn test_status_style() {
        assert_eq!(status_style(STATUS_AVAILABLE), Some(StatusStyle::Success));
        assert_eq!(status_style(STATUS_UNAVAILABLE), Some(StatusStyle::Danger));
        assert_eq!(status_style(7), None);
    }

    #[test]
    fn test_toggle_round_trip() {
        for flag in [STATUS_AVAILABLE, STATUS_UNAVAILABLE] {
            assert_ne!(toggle(flag), flag);
            assert_eq!(toggle(toggle(flag)), flag);
        }
        assert_eq!(toggle(5), STATUS_AVAILABLE);
    }

    #[test]
    fn test_change_status() {
        let mut room = Room::new("A101".to_string(), 1, 1);
        assert_eq!(room.status_label(), Some("available"));
        room.change_status();
        assert_eq!(room.available, STATUS_UNAVAILABLE);
        assert_eq!(room.status_style(), Some(StatusStyle::Danger));
    }

    #[test]
    fn test_approval_descriptor_threshold() {
        assert_eq!(approval_descriptor(0).label, "unassigned");
        assert_eq!(approval_descriptor(0).style, StatusStyle::Success);
        assert_eq!(approval_descriptor(1).label, "assigned");
        assert_eq!(approval_descriptor(3).style, StatusStyle::Danger);
    }

    #[test]
    fn test_all_statuses() {
        let statuses = all_statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[&STATUS_AVAILABLE], "available");
        assert_eq!(statuses[&STATUS_UNAVAILABLE], "unavailable");
    }

    #[test]
    fn test_style_serializes_as_class() {
        assert_eq!(serde_json::to_string(&StatusStyle::Success).unwrap(), "\"bg-success\"");
        assert_eq!(serde_json::to_string(&StatusStyle::Danger).unwrap(), "\"bg-danger\"");
    }
}
