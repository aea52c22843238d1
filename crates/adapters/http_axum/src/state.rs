//! Shared application state for axum handlers.

use std::sync::Arc;

use homedash_app::ports::CommandExecutor;
use homedash_app::render_bus::RenderBus;
use homedash_app::services::dashboard::Dashboard;
use homedash_app::toast_tray::ToastTray;

/// The dashboard as wired for HTTP: toasts go to the tray, renders to the bus.
pub type HttpDashboard<E> = Dashboard<E, Arc<ToastTray>, Arc<RenderBus>>;

/// Application state shared across all axum handlers.
///
/// Generic over the command executor to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<E> {
    pub dashboard: Arc<HttpDashboard<E>>,
    /// Notification tray the dashboard reports into.
    pub toasts: Arc<ToastTray>,
    /// Render bus the dashboard draws onto.
    pub renders: Arc<RenderBus>,
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            toasts: Arc::clone(&self.toasts),
            renders: Arc::clone(&self.renders),
        }
    }
}

impl<E> AppState<E>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    /// Create the state from pre-wrapped `Arc`s.
    ///
    /// `toasts` and `renders` must be the same instances the dashboard was
    /// built with, otherwise the stream and tray endpoints observe nothing.
    pub fn new(
        dashboard: Arc<HttpDashboard<E>>,
        toasts: Arc<ToastTray>,
        renders: Arc<RenderBus>,
    ) -> Self {
        Self {
            dashboard,
            toasts,
            renders,
        }
    }
}
