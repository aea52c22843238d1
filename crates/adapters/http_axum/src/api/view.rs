//! JSON handlers for the room filter and tab selection.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use homedash_app::ports::CommandExecutor;
use homedash_domain::dashboard::DashboardView;
use homedash_domain::room::RoomFilter;
use homedash_domain::view::Tab;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `PUT /api/view/room`.
#[derive(Deserialize)]
pub struct SetRoomRequest {
    /// A room tag, or `all`.
    pub room: String,
}

/// Request body for `PUT /api/view/tab`.
#[derive(Deserialize)]
pub struct SetTabRequest {
    pub tab: String,
}

/// Response of a view selection: whether it changed, and the new projection.
#[derive(Serialize)]
pub struct ViewChanged {
    pub changed: bool,
    pub view: DashboardView,
}

/// `GET /api/dashboard`
pub async fn dashboard<E>(State(state): State<AppState<E>>) -> Json<DashboardView>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    Json(state.dashboard.view())
}

/// `PUT /api/view/room`
pub async fn set_room<E>(
    State(state): State<AppState<E>>,
    Json(req): Json<SetRoomRequest>,
) -> Result<Json<ViewChanged>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let room = RoomFilter::from_str(&req.room)?;
    let changed = state.dashboard.set_active_room(room);
    Ok(Json(ViewChanged {
        changed,
        view: state.dashboard.view(),
    }))
}

/// `PUT /api/view/tab`
pub async fn set_tab<E>(
    State(state): State<AppState<E>>,
    Json(req): Json<SetTabRequest>,
) -> Result<Json<ViewChanged>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let tab = Tab::from_str(&req.tab)?;
    let changed = state.dashboard.set_active_tab(tab);
    Ok(Json(ViewChanged {
        changed,
        view: state.dashboard.view(),
    }))
}
