//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod notifications;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod view;

use axum::Router;
use axum::routing::{get, post, put};

use homedash_app::ports::CommandExecutor;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<E>() -> Router<AppState<E>>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    Router::new()
        // View state
        .route("/dashboard", get(view::dashboard::<E>))
        .route("/view/room", put(view::set_room::<E>))
        .route("/view/tab", put(view::set_tab::<E>))
        // Devices
        .route("/devices/{id}", get(devices::get::<E>))
        .route("/devices/{id}/power", post(devices::power::<E>))
        .route("/devices/{id}/mode", post(devices::mode::<E>))
        .route("/devices/{id}/security", post(devices::security::<E>))
        .route("/devices/{id}/camera", post(devices::camera::<E>))
        .route("/devices/{id}/brightness", put(devices::brightness::<E>))
        .route(
            "/devices/{id}/brightness/release",
            post(devices::release_brightness::<E>),
        )
        .route("/devices/{id}/temperature", put(devices::temperature::<E>))
        .route(
            "/devices/{id}/temperature/release",
            post(devices::release_temperature::<E>),
        )
        // Notifications
        .route("/notifications", get(notifications::list::<E>))
        .route(
            "/notifications/{id}",
            axum::routing::delete(notifications::dismiss::<E>),
        )
        // Live updates
        .route("/stream", get(sse::stream::<E>))
}
