//! Dashboard service: the explicit application-state object.
//!
//! Owns the device registry, view state and load progress, and is the only
//! place that triggers the [`Renderer`]. Update operations live in
//! [`update_controller`](super::update_controller).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use homedash_domain::dashboard::DashboardView;
use homedash_domain::device::Device;
use homedash_domain::error::HomeDashError;
use homedash_domain::field::{Field, FieldValue};
use homedash_domain::id::DeviceId;
use homedash_domain::notification::Notification;
use homedash_domain::registry::DeviceRegistry;
use homedash_domain::room::RoomFilter;
use homedash_domain::view::{LoadState, Tab, ViewState};

use crate::debounce::Debouncer;
use crate::in_flight::InFlightLedger;
use crate::ports::{CommandExecutor, DeviceSource, Notifier, Renderer};

/// Idle window before a continuous control sends its value.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub(crate) const LOAD_FAILED_MESSAGE: &str = "Failed to load your devices. Please try again.";

/// Mutable state guarded by the dashboard lock.
#[derive(Debug, Default)]
pub(crate) struct DashboardState {
    pub(crate) registry: DeviceRegistry,
    pub(crate) view: ViewState,
    pub(crate) load: LoadState,
    /// Set once the first load has begun.
    load_started: bool,
    pub(crate) in_flight: InFlightLedger<(DeviceId, Field), FieldValue>,
}

impl DashboardState {
    /// Borrow the registry once it has been populated.
    pub(crate) fn ready_registry(&mut self) -> Result<&mut DeviceRegistry, HomeDashError> {
        match self.load {
            LoadState::Ready => Ok(&mut self.registry),
            LoadState::Loading | LoadState::Failed => Err(HomeDashError::NotLoaded),
        }
    }

    fn project(&self) -> DashboardView {
        DashboardView::project(&self.registry, &self.view, self.load)
    }
}

/// Application state plus the ports it drives.
///
/// Every method takes `&self`; the state is behind a mutex that is never
/// held across an `.await`, so the dashboard can be shared through an
/// [`Arc`] by concurrent callers.
///
/// Renderers are invoked while the state lock is held so that frames are
/// delivered in mutation order. A [`Renderer`] must therefore not call back
/// into the dashboard.
pub struct Dashboard<E, N, R> {
    pub(crate) state: Mutex<DashboardState>,
    pub(crate) executor: Arc<E>,
    pub(crate) notifier: N,
    renderer: R,
    pub(crate) debouncer: Debouncer<(DeviceId, Field)>,
}

impl<E, N, R> Dashboard<E, N, R>
where
    E: CommandExecutor + Send + Sync + 'static,
    N: Notifier,
    R: Renderer,
{
    /// Create an empty dashboard in the [`LoadState::Loading`] state.
    pub fn new(executor: E, notifier: N, renderer: R) -> Self {
        Self::with_debounce(executor, notifier, renderer, DEFAULT_DEBOUNCE)
    }

    /// Like [`Dashboard::new`] with a custom debounce window for continuous
    /// controls.
    pub fn with_debounce(executor: E, notifier: N, renderer: R, debounce: Duration) -> Self {
        Self {
            state: Mutex::new(DashboardState::default()),
            executor: Arc::new(executor),
            notifier,
            renderer,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Populate the registry from `source`.
    ///
    /// Runs at most once: calling it again after the first attempt is a
    /// no-op. A failure leaves the dashboard empty in
    /// [`LoadState::Failed`]; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source reported.
    #[tracing::instrument(skip(self, source))]
    pub async fn load(&self, source: &impl DeviceSource) -> Result<(), HomeDashError> {
        {
            let mut state = self.lock_state();
            if state.load_started {
                tracing::warn!("device registry load already started, ignoring");
                return Ok(());
            }
            state.load_started = true;
        }

        match source.load().await {
            Ok(registry) => {
                let mut state = self.lock_state();
                tracing::info!(devices = registry.len(), "device registry loaded");
                state.registry = registry;
                state.load = LoadState::Ready;
                self.render_locked(&state);
                Ok(())
            }
            Err(err) => {
                {
                    let mut state = self.lock_state();
                    tracing::error!(error = %err, "failed to load device registry");
                    state.load = LoadState::Failed;
                    self.render_locked(&state);
                }
                self.notifier
                    .notify(Notification::error("Error", LOAD_FAILED_MESSAGE));
                Err(err)
            }
        }
    }

    /// Select the room filter and re-render. Returns whether it changed.
    #[tracing::instrument(skip(self))]
    pub fn set_active_room(&self, room: RoomFilter) -> bool {
        let mut state = self.lock_state();
        let changed = state.view.set_room(room);
        self.render_locked(&state);
        changed
    }

    /// Select the visible tab and re-render. Returns whether it changed.
    #[tracing::instrument(skip(self))]
    pub fn set_active_tab(&self, tab: Tab) -> bool {
        let mut state = self.lock_state();
        let changed = state.view.set_tab(tab);
        self.render_locked(&state);
        changed
    }

    /// Current projection of registry and view state.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        self.lock_state().project()
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.lock_state().view.clone()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.lock_state().load
    }

    /// Snapshot of one device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotLoaded`] before a successful load, or
    /// [`HomeDashError::NotFound`] for an unknown id.
    pub fn device(&self, id: &DeviceId) -> Result<Device, HomeDashError> {
        let mut state = self.lock_state();
        state.ready_registry()?.require(id).cloned()
    }

    /// Number of continuous controls with a pending debounced send.
    #[must_use]
    pub fn pending_sends(&self) -> usize {
        self.debouncer.pending()
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Project and hand the view to the renderer. Skipped while loading.
    pub(crate) fn render_locked(&self, state: &DashboardState) {
        if state.load == LoadState::Loading {
            return;
        }
        self.renderer.render(&state.project());
    }
}
