//! Port doubles and a ready-made state for handler tests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use homedash_app::ports::{CommandExecutor, DeviceSource};
use homedash_app::render_bus::RenderBus;
use homedash_app::services::dashboard::Dashboard;
use homedash_app::toast_tray::ToastTray;
use homedash_domain::command::Command;
use homedash_domain::device::{Device, DeviceKind, ThermostatMode};
use homedash_domain::error::HomeDashError;
use homedash_domain::registry::DeviceRegistry;

use crate::state::AppState;

pub struct AcceptAll;

impl CommandExecutor for AcceptAll {
    fn execute(
        &self,
        _command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        async { Ok(true) }
    }
}

pub struct RejectAll;

impl CommandExecutor for RejectAll {
    fn execute(
        &self,
        _command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        async { Ok(false) }
    }
}

struct StaticSource(DeviceRegistry);

impl DeviceSource for StaticSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send {
        let registry = self.0.clone();
        async move { Ok(registry) }
    }
}

fn registry() -> DeviceRegistry {
    let devices = [
        Device::builder()
            .id("light-1")
            .name("Living Room")
            .room("living")
            .state(false)
            .kind(DeviceKind::Light { brightness: 60 }),
        Device::builder()
            .id("light-2")
            .name("Kitchen")
            .room("kitchen")
            .state(true)
            .kind(DeviceKind::Light { brightness: 80 }),
        Device::builder()
            .id("therm-1")
            .name("Living Room")
            .room("living")
            .state(true)
            .kind(DeviceKind::Thermostat {
                temperature: 72,
                mode: ThermostatMode::Heat,
            }),
        Device::builder()
            .id("cam-1")
            .name("Front Door")
            .room("exterior")
            .state(true)
            .kind(DeviceKind::Camera { recording: false }),
        Device::builder()
            .id("sec-1")
            .name("Alarm System")
            .state(true)
            .kind(DeviceKind::Alarm { armed: false }),
    ];
    let mut registry = DeviceRegistry::new();
    for builder in devices {
        registry.insert(builder.build().unwrap()).unwrap();
    }
    registry
}

/// State whose dashboard has not been loaded.
pub fn empty_state<E>(executor: E) -> AppState<E>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let toasts = Arc::new(ToastTray::new(Duration::from_secs(3), 16));
    let renders = Arc::new(RenderBus::new(16));
    let dashboard = Arc::new(Dashboard::new(
        executor,
        Arc::clone(&toasts),
        Arc::clone(&renders),
    ));
    AppState::new(dashboard, toasts, renders)
}

/// State with a small loaded household.
pub async fn demo_state<E>(executor: E) -> AppState<E>
where
    E: CommandExecutor + Send + Sync + 'static,
{
    let state = empty_state(executor);
    state
        .dashboard
        .load(&StaticSource(registry()))
        .await
        .unwrap();
    state
}
