//! In-memory port doubles shared by the service tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;

use homedash_domain::command::Command;
use homedash_domain::dashboard::DashboardView;
use homedash_domain::device::{Device, DeviceKind, ThermostatMode};
use homedash_domain::error::HomeDashError;
use homedash_domain::notification::Notification;
use homedash_domain::registry::DeviceRegistry;

use crate::ports::{CommandExecutor, DeviceSource, Notifier, Renderer};

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Accept,
    Reject,
    Fault,
}

/// Replays scripted outcomes, then falls back to a default.
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    calls: Mutex<Vec<Command>>,
}

impl ScriptedExecutor {
    pub fn always(fallback: Outcome) -> Self {
        Self::scripted(Vec::new(), fallback)
    }

    pub fn accepting() -> Self {
        Self::always(Outcome::Accept)
    }

    pub fn scripted(script: Vec<Outcome>, fallback: Outcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Command> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        self.calls.lock().unwrap().push(command);
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        async move {
            match outcome {
                Outcome::Accept => Ok(true),
                Outcome::Reject => Ok(false),
                Outcome::Fault => Err(HomeDashError::transport(std::io::Error::other(
                    "link down",
                ))),
            }
        }
    }
}

/// Holds every call open until the test releases its gate.
pub struct GatedExecutor {
    gates: Mutex<VecDeque<oneshot::Receiver<bool>>>,
    calls: Mutex<Vec<Command>>,
}

impl GatedExecutor {
    pub fn new(count: usize) -> (Self, Vec<oneshot::Sender<bool>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();
        let executor = Self {
            gates: Mutex::new(receivers),
            calls: Mutex::new(Vec::new()),
        };
        (executor, senders)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Command> {
        self.calls.lock().unwrap().clone()
    }

    /// Yield until `count` calls have reached the executor.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.call_count() < count {
            tokio::task::yield_now().await;
        }
    }
}

impl CommandExecutor for GatedExecutor {
    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        let gate = self.gates.lock().unwrap().pop_front();
        self.calls.lock().unwrap().push(command);
        async move {
            match gate {
                Some(gate) => gate
                    .await
                    .map_err(HomeDashError::transport),
                None => Ok(true),
            }
        }
    }
}

#[derive(Default)]
pub struct SpyNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl SpyNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for SpyNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct CountingRenderer {
    frames: Mutex<Vec<DashboardView>>,
}

impl CountingRenderer {
    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<DashboardView> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl Renderer for CountingRenderer {
    fn render(&self, view: &DashboardView) {
        self.frames.lock().unwrap().push(view.clone());
    }
}

pub struct StaticSource(pub DeviceRegistry);

impl DeviceSource for StaticSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send {
        let registry = self.0.clone();
        async move { Ok(registry) }
    }
}

/// Serves a registry after `delay`, counting how often it was asked.
pub struct CountingSource {
    registry: DeviceRegistry,
    delay: Duration,
    loads: AtomicUsize,
}

impl CountingSource {
    pub fn new(registry: DeviceRegistry, delay: Duration) -> Self {
        Self {
            registry,
            delay,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DeviceSource for CountingSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let registry = self.registry.clone();
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            Ok(registry)
        }
    }
}

pub struct FailingSource;

impl DeviceSource for FailingSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send {
        async {
            Err(HomeDashError::transport(std::io::Error::other(
                "backend unavailable",
            )))
        }
    }
}

pub fn registry_with(devices: Vec<Device>) -> DeviceRegistry {
    let mut registry = DeviceRegistry::new();
    for device in devices {
        registry.insert(device).unwrap();
    }
    registry
}

fn device(id: &str, name: &str, room: Option<&str>, state: bool, kind: DeviceKind) -> Device {
    let builder = Device::builder().id(id).name(name).state(state).kind(kind);
    match room {
        Some(room) => builder.room(room),
        None => builder,
    }
    .build()
    .unwrap()
}

pub fn light(id: &str, room: &str, state: bool, brightness: u8) -> Device {
    device(id, "Lamp", Some(room), state, DeviceKind::Light { brightness })
}

pub fn thermostat(id: &str, state: bool, temperature: u8, mode: ThermostatMode) -> Device {
    device(
        id,
        "Thermostat",
        Some("living"),
        state,
        DeviceKind::Thermostat { temperature, mode },
    )
}

pub fn camera(id: &str, state: bool, recording: bool) -> Device {
    device(id, "Front Door", Some("exterior"), state, DeviceKind::Camera { recording })
}

pub fn alarm(id: &str, armed: bool) -> Device {
    device(id, "Alarm System", None, true, DeviceKind::Alarm { armed })
}

pub fn lock(id: &str, locked: bool) -> Device {
    device(id, "Door Locks", None, true, DeviceKind::Lock { locked })
}

pub fn sensor(id: &str, triggered: bool) -> Device {
    device(id, "Motion Sensors", None, true, DeviceKind::Sensor { triggered })
}
