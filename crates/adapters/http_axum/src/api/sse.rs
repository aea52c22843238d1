//! Server-Sent Events (SSE) stream for real-time updates.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Serialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use homedash_app::ports::CommandExecutor;
use homedash_app::render_bus::RenderFrame;

use crate::state::AppState;

/// SSE event name for dashboard projections.
pub const RENDER_EVENT: &str = "render";
/// SSE event name for notification tray changes.
pub const NOTIFICATION_EVENT: &str = "notification";

fn encode(name: &'static str, payload: &impl Serialize) -> Option<Event> {
    match serde_json::to_string(payload) {
        Ok(json) => Some(Event::default().event(name).data(json)),
        Err(err) => {
            tracing::warn!(%err, event = name, "failed to serialize payload for SSE stream");
            None
        }
    }
}

fn lagged(name: &'static str, BroadcastStreamRecvError::Lagged(n): BroadcastStreamRecvError) {
    tracing::warn!(
        skipped = n,
        event = name,
        "SSE subscriber lagged, some events were dropped"
    );
}

/// `GET /api/stream`: SSE stream of render frames and notifications.
///
/// The first event is a `render` frame with the current projection, so a
/// client can draw immediately. After that, every render published on the
/// bus is sent as a `render` event and every tray change as a
/// `notification` event. The stream continues until the client disconnects.
pub async fn stream<E>(
    State(state): State<AppState<E>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let renders = BroadcastStream::new(state.renders.subscribe());
    let toasts = BroadcastStream::new(state.toasts.subscribe());

    let initial = RenderFrame {
        revision: state.renders.revision(),
        view: state.dashboard.view(),
    };

    let renders = renders.filter_map(|result| match result {
        Ok(frame) => encode(RENDER_EVENT, &frame),
        Err(err) => {
            lagged(RENDER_EVENT, err);
            None
        }
    });
    let toasts = toasts.filter_map(|result| match result {
        Ok(change) => encode(NOTIFICATION_EVENT, &change),
        Err(err) => {
            lagged(NOTIFICATION_EVENT, err);
            None
        }
    });

    let events = tokio_stream::iter(encode(RENDER_EVENT, &initial))
        .chain(renders.merge(toasts))
        .map(Ok);

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    use homedash_app::ports::Notifier;
    use homedash_domain::notification::Notification;

    use crate::test_support::{demo_state, AcceptAll};

    async fn next_chunk(body: &mut axum::body::Body) -> String {
        let frame = body.frame().await.unwrap().unwrap();
        String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_start_with_current_projection() {
        let state = demo_state(AcceptAll).await;

        let mut body = stream(State(state)).await.into_response().into_body();

        let chunk = next_chunk(&mut body).await;
        assert!(chunk.starts_with("event: render\n"), "{chunk}");
        assert!(chunk.contains("\"load_state\":\"ready\""), "{chunk}");
    }

    #[tokio::test]
    async fn should_forward_notifications_after_initial_frame() {
        let state = demo_state(AcceptAll).await;
        let mut body = stream(State(state.clone())).await.into_response().into_body();
        let _initial = next_chunk(&mut body).await;

        state
            .toasts
            .notify(Notification::success("Device Updated", "Lamp turned on"));

        let chunk = next_chunk(&mut body).await;
        assert!(chunk.starts_with("event: notification\n"), "{chunk}");
        assert!(chunk.contains("Lamp turned on"), "{chunk}");
    }

    #[tokio::test]
    async fn should_forward_render_frames() {
        let state = demo_state(AcceptAll).await;
        let mut body = stream(State(state.clone())).await.into_response().into_body();
        let _initial = next_chunk(&mut body).await;

        state
            .dashboard
            .set_active_tab(homedash_domain::view::Tab::Cameras);

        let chunk = next_chunk(&mut body).await;
        assert!(chunk.starts_with("event: render\n"), "{chunk}");
        assert!(chunk.contains("\"tab\":\"cameras\""), "{chunk}");
    }
}
