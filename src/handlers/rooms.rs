use crate::AppState;
use crate::db::application::ApplicationRepository;
use crate::db::campus::CampusRepository;
use crate::db::room::RoomRepository;
use crate::db::room_type::RoomTypeRepository;
use crate::error::{AppError, AppResult};
use crate::forms::RoomForm;
use crate::models::room::StatusStyle;
use crate::models::{Application, Room};
use crate::occupancy::{self, Occupancy};
use crate::window::TimeWindow;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A room with its lookup names and display status resolved.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    #[serde(flatten)]
    pub room: Room,
    pub type_name: Option<String>,
    pub campus_name: Option<String>,
    pub status_label: Option<&'static str>,
    pub status_style: Option<StatusStyle>,
}

impl RoomView {
    fn new(room: Room, types: &BTreeMap<i32, String>, campuses: &BTreeMap<i32, String>) -> Self {
        Self {
            type_name: types.get(&room.room_type).cloned(),
            campus_name: campuses.get(&room.campus).cloned(),
            status_label: room.status_label(),
            status_style: room.status_style(),
            room,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub saved: bool,
    pub room: RoomView,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub start: String,
    pub end: String,
}

async fn lookup_names(state: &AppState) -> AppResult<(BTreeMap<i32, String>, BTreeMap<i32, String>)> {
    let types = RoomTypeRepository::new(state.db_pool.clone()).get_names().await?;
    let campuses = CampusRepository::new(state.db_pool.clone()).get_names().await?;
    Ok((types, campuses))
}

async fn view(state: &AppState, room: Room) -> AppResult<RoomView> {
    let (types, campuses) = lookup_names(state).await?;
    Ok(RoomView::new(room, &types, &campuses))
}

async fn find_room(repo: &RoomRepository, id: i32) -> AppResult<Room> {
    repo.get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("room {}", id)))
}

pub async fn handle_list_rooms(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<RoomView>>> {
    let rooms = RoomRepository::new(state.db_pool.clone()).get_all().await?;
    let (types, campuses) = lookup_names(&state).await?;
    Ok(Json(
        rooms
            .into_iter()
            .map(|room| RoomView::new(room, &types, &campuses))
            .collect(),
    ))
}

pub async fn handle_get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<RoomView>> {
    let room = find_room(&RoomRepository::new(state.db_pool.clone()), id).await?;
    Ok(Json(view(&state, room).await?))
}

pub async fn handle_create_room(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RoomForm>,
) -> AppResult<(StatusCode, Json<RoomView>)> {
    let room = form
        .validate(
            &RoomTypeRepository::new(state.db_pool.clone()),
            &CampusRepository::new(state.db_pool.clone()),
        )
        .await?;
    let room = RoomRepository::new(state.db_pool.clone()).create(&room).await?;
    tracing::info!("Created room {} ({})", room.room_number, room.id);
    Ok((StatusCode::CREATED, Json(view(&state, room).await?)))
}

pub async fn handle_update_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<RoomForm>,
) -> AppResult<Json<RoomView>> {
    let repo = RoomRepository::new(state.db_pool.clone());
    find_room(&repo, id).await?;

    let mut room = form
        .validate(
            &RoomTypeRepository::new(state.db_pool.clone()),
            &CampusRepository::new(state.db_pool.clone()),
        )
        .await?;
    room.id = id;

    if !repo.update(&room).await? {
        return Err(AppError::NotFound(format!("room {}", id)));
    }
    tracing::info!("Updated room {} ({})", room.room_number, room.id);
    Ok(Json(view(&state, room).await?))
}

/// Flip a room between available and unavailable.
pub async fn handle_toggle_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<ToggleResponse>> {
    let repo = RoomRepository::new(state.db_pool.clone());
    let mut room = find_room(&repo, id).await?;

    room.change_status();
    let saved = repo.update_available(room.id, room.available).await?;
    if saved {
        tracing::info!("Room {} is now {}", room.id, room.status_label().unwrap_or("unknown"));
    } else {
        tracing::warn!("Room {} disappeared before its status could be saved", room.id);
    }

    Ok(Json(ToggleResponse {
        saved,
        room: view(&state, room).await?,
    }))
}

pub async fn handle_room_applications(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Application>>> {
    find_room(&RoomRepository::new(state.db_pool.clone()), id).await?;
    let applications = ApplicationRepository::new(state.db_pool.clone())
        .get_by_room(id)
        .await?;
    Ok(Json(applications))
}

/// Queue length and approval status of a room over `?start=&end=`.
pub async fn handle_occupancy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<Occupancy>> {
    let window = TimeWindow::parse(&query.start, &query.end, state.config.utc_offset)?;
    let applications = ApplicationRepository::new(state.db_pool.clone());
    Ok(Json(occupancy::occupancy(&applications, id, window).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::STATUS_UNAVAILABLE;

    #[test]
    fn test_room_view_resolves_names() {
        let types = BTreeMap::from([(1, "Classroom".to_string())]);
        let campuses = BTreeMap::from([(2, "North".to_string())]);
        let mut room = Room::new("A101".to_string(), 1, 2);
        room.id = 5;

        let view = RoomView::new(room.clone(), &types, &campuses);
        assert_eq!(view.type_name.as_deref(), Some("Classroom"));
        assert_eq!(view.campus_name.as_deref(), Some("North"));
        assert_eq!(view.status_label, Some("available"));

        room.room_type = 9;
        room.available = STATUS_UNAVAILABLE;
        let view = RoomView::new(room, &types, &campuses);
        assert_eq!(view.type_name, None);
        assert_eq!(view.status_style, Some(StatusStyle::Danger));
    }

    #[tokio::test]
    async fn test_occupancy_rejects_bad_window_before_querying() {
        let db_pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/roombook_unused")
            .unwrap();
        let state = Arc::new(AppState {
            db_pool,
            config: crate::config::Config {
                database_url: "postgres://localhost/roombook_unused".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
                utc_offset: chrono::FixedOffset::east_opt(0).unwrap(),
            },
        });

        let backwards = WindowQuery {
            start: "2024-05-01 10:00".to_string(),
            end: "2024-05-01 09:00".to_string(),
        };
        let result = handle_occupancy(State(state.clone()), Path(1), Query(backwards)).await;
        assert!(matches!(result, Err(AppError::InvalidWindow { .. })));

        let garbage = WindowQuery {
            start: "next tuesday".to_string(),
            end: "2024-05-01 09:00".to_string(),
        };
        let result = handle_occupancy(State(state), Path(1), Query(garbage)).await;
        assert!(matches!(result, Err(AppError::InvalidTime(_))));
    }

    #[test]
    fn test_room_view_json_shape() {
        let mut room = Room::new("B7".to_string(), 1, 1);
        room.available = 2;
        let view = RoomView::new(room, &BTreeMap::new(), &BTreeMap::new());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["room_number"], "B7");
        assert_eq!(json["type"], 1);
        assert!(json["status_label"].is_null());
        assert!(json["status_style"].is_null());
    }
}
