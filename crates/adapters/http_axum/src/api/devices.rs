//! JSON handlers for device controls.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use homedash_app::ports::CommandExecutor;
use homedash_app::services::update_controller::UpdateOutcome;
use homedash_domain::action::{CameraAction, SecurityAction};
use homedash_domain::device::{Device, ThermostatMode};
use homedash_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/devices/{id}/power`.
///
/// Without `on`, the current state is flipped.
#[derive(Deserialize)]
pub struct PowerRequest {
    pub on: Option<bool>,
}

/// Request body for `POST /api/devices/{id}/mode`.
#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

/// Request body for security and camera actions.
#[derive(Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

/// Request body for continuous slider input.
#[derive(Deserialize)]
pub struct LevelRequest {
    pub value: u8,
}

/// How a confirmed update settled, with the device as it is now.
#[derive(Serialize)]
pub struct UpdateResponse {
    pub outcome: UpdateOutcome,
    pub device: Device,
}

/// Possible responses from the slider endpoints.
pub enum LevelResponse {
    /// The value is applied locally; the send is pending.
    Accepted(Json<Device>),
    /// Slider released and confirmed.
    NoContent,
}

impl IntoResponse for LevelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn settled<E>(
    state: &AppState<E>,
    id: &DeviceId,
    outcome: UpdateOutcome,
) -> Result<Json<UpdateResponse>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let device = state.dashboard.device(id)?;
    Ok(Json(UpdateResponse { outcome, device }))
}

/// `GET /api/devices/{id}`
pub async fn get<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    Ok(Json(state.dashboard.device(&id)?))
}

/// `POST /api/devices/{id}/power`
pub async fn power<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<PowerRequest>,
) -> Result<Json<UpdateResponse>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    let outcome = match req.on {
        Some(on) => state.dashboard.set_power(&id, on).await?,
        None => state.dashboard.toggle_power(&id).await?,
    };
    settled(&state, &id, outcome)
}

/// `POST /api/devices/{id}/mode`
pub async fn mode<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<ModeRequest>,
) -> Result<Json<UpdateResponse>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    let mode = ThermostatMode::from_str(&req.mode)?;
    let outcome = state.dashboard.set_mode(&id, mode).await?;
    settled(&state, &id, outcome)
}

/// `POST /api/devices/{id}/security`
pub async fn security<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<UpdateResponse>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    let action = SecurityAction::from_str(&req.action)?;
    let outcome = state.dashboard.security_action(&id, action).await?;
    settled(&state, &id, outcome)
}

/// `POST /api/devices/{id}/camera`
pub async fn camera<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<UpdateResponse>, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    let action = CameraAction::from_str(&req.action)?;
    let outcome = state.dashboard.camera_action(&id, action).await?;
    settled(&state, &id, outcome)
}

/// `PUT /api/devices/{id}/brightness`
pub async fn brightness<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<LevelRequest>,
) -> Result<LevelResponse, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    state.dashboard.adjust_brightness(&id, req.value)?;
    Ok(LevelResponse::Accepted(Json(state.dashboard.device(&id)?)))
}

/// `POST /api/devices/{id}/brightness/release`
pub async fn release_brightness<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
) -> Result<LevelResponse, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    state.dashboard.finish_brightness(&id)?;
    Ok(LevelResponse::NoContent)
}

/// `PUT /api/devices/{id}/temperature`
pub async fn temperature<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
    Json(req): Json<LevelRequest>,
) -> Result<LevelResponse, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    state.dashboard.adjust_temperature(&id, req.value)?;
    Ok(LevelResponse::Accepted(Json(state.dashboard.device(&id)?)))
}

/// `POST /api/devices/{id}/temperature/release`
pub async fn release_temperature<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
) -> Result<LevelResponse, ApiError>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let id = DeviceId::from_str(&id)?;
    state.dashboard.finish_temperature(&id)?;
    Ok(LevelResponse::NoContent)
}
