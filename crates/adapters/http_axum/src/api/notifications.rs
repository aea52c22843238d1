//! JSON handlers for the notification tray.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use homedash_app::ports::CommandExecutor;
use homedash_app::toast_tray::Toast;
use homedash_domain::error::NotFoundError;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/notifications`
pub async fn list<E>(State(state): State<AppState<E>>) -> Json<Vec<Toast>>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    Json(state.toasts.active())
}

/// `DELETE /api/notifications/{id}`
pub async fn dismiss<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    if state.toasts.dismiss(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(NotFoundError {
            entity: "Notification",
            id: id.to_string(),
        }
        .into())
    }
}
