use crate::AppState;
use crate::db::campus::CampusRepository;
use crate::db::room_type::RoomTypeRepository;
use crate::error::AppResult;
use crate::models::room::all_statuses;
use axum::{extract::State, response::Json};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Room type id -> name, for filters and select boxes
pub async fn handle_room_types(State(state): State<Arc<AppState>>) -> AppResult<Json<BTreeMap<i32, String>>> {
    let repo = RoomTypeRepository::new(state.db_pool.clone());
    Ok(Json(repo.get_names().await?))
}

/// Campus id -> name
pub async fn handle_campuses(State(state): State<Arc<AppState>>) -> AppResult<Json<BTreeMap<i32, String>>> {
    let repo = CampusRepository::new(state.db_pool.clone());
    Ok(Json(repo.get_names().await?))
}

pub async fn handle_room_statuses() -> Json<BTreeMap<i16, &'static str>> {
    Json(all_statuses())
}
