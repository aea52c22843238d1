//! Update controller: every user mutation of the device registry.
//!
//! Remotely confirmed mutations (power, thermostat mode, security actions,
//! camera recording) share one optimistic protocol:
//!
//! 1. snapshot the field and write the new value into the registry
//! 2. render
//! 3. send the command
//! 4. keep the value on success, restore the snapshot and render again on
//!    failure
//! 5. notify
//!
//! Writes to the same `(device, field)` pair are sequenced through the
//! in-flight ledger: only the newest write may commit or roll back.
//!
//! Continuous controls (brightness, temperature) write through immediately
//! and send a debounced command once the control is idle.

use std::sync::Arc;

use serde::Serialize;

use homedash_domain::action::{CameraAction, SecurityAction};
use homedash_domain::command::Command;
use homedash_domain::device::{Device, DeviceKind, ThermostatMode};
use homedash_domain::error::{HomeDashError, ValidationError};
use homedash_domain::field::{Field, FieldValue};
use homedash_domain::id::DeviceId;
use homedash_domain::notification::Notification;

use super::dashboard::Dashboard;
use crate::in_flight::Resolution;
use crate::ports::{CommandExecutor, Notifier, Renderer};

/// How an update operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The command was confirmed and the new value kept.
    Committed,
    /// The command failed and the previous value was restored.
    RolledBack,
    /// The command failed and there was nothing to restore.
    Rejected,
    /// The request matched the current value; nothing was sent.
    Unchanged,
    /// A newer write to the same field started before this one resolved.
    Superseded,
}

/// A single-field optimistic write prepared from the current device.
struct OptimisticUpdate {
    field: Field,
    value: FieldValue,
    action: &'static str,
    payload: serde_json::Value,
    on_success: Notification,
    on_failure: Notification,
}

/// An optimistic write whose command has not resolved yet.
///
/// Dropping it while still armed (the update future was cancelled) settles
/// the write as failed, so the registry and the in-flight ledger never keep
/// an unconfirmed value.
struct PendingWrite<'a, E, N, R>
where
    E: CommandExecutor + Send + Sync + 'static,
    N: Notifier,
    R: Renderer,
{
    dashboard: &'a Dashboard<E, N, R>,
    key: (DeviceId, Field),
    token: u64,
    written: FieldValue,
    on_failure: Option<Notification>,
}

impl<E, N, R> PendingWrite<'_, E, N, R>
where
    E: CommandExecutor + Send + Sync + 'static,
    N: Notifier,
    R: Renderer,
{
    /// The command resolved; hand the failure notice back to the caller.
    fn disarm(mut self) -> Option<Notification> {
        self.on_failure.take()
    }
}

impl<E, N, R> Drop for PendingWrite<'_, E, N, R>
where
    E: CommandExecutor + Send + Sync + 'static,
    N: Notifier,
    R: Renderer,
{
    fn drop(&mut self) {
        let Some(on_failure) = self.on_failure.take() else {
            return;
        };
        tracing::warn!(field = %self.key.1, "update cancelled before the command resolved");
        let outcome = self
            .dashboard
            .resolve_write(&self.key, self.token, false, self.written);
        if outcome == UpdateOutcome::RolledBack {
            self.dashboard.notifier.notify(on_failure);
        }
    }
}

fn failure(what: &str) -> Notification {
    Notification::error("Error", format!("Failed to update {what}. Please try again."))
}

fn ensure_powered(device: &Device) -> Result<(), ValidationError> {
    if device.state {
        Ok(())
    } else {
        Err(ValidationError::DeviceOff(device.id().to_string()))
    }
}

fn level(device: &Device, field: Field) -> Option<u8> {
    match device.field(field) {
        Some(FieldValue::Level(v)) => Some(v),
        _ => None,
    }
}

impl<E, N, R> Dashboard<E, N, R>
where
    E: CommandExecutor + Send + Sync + 'static,
    N: Notifier,
    R: Renderer,
{
    /// Switch a device on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotLoaded`] before a successful load, or
    /// [`HomeDashError::NotFound`] for an unknown id. Command failures are
    /// reported through the outcome, never as an error.
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub async fn set_power(&self, id: &DeviceId, on: bool) -> Result<UpdateOutcome, HomeDashError> {
        self.run_optimistic(id, |device| {
            if device.state == on {
                return Ok(None);
            }
            let name = &device.name;
            Ok(Some(OptimisticUpdate {
                field: Field::Power,
                value: FieldValue::Flag(on),
                action: "toggle",
                payload: on.into(),
                on_success: Notification::success(
                    "Device Updated",
                    format!("{name} turned {}", if on { "on" } else { "off" }),
                ),
                on_failure: failure("device"),
            }))
        })
        .await
    }

    /// Flip a device's power state.
    ///
    /// # Errors
    ///
    /// Same as [`Dashboard::set_power`].
    pub async fn toggle_power(&self, id: &DeviceId) -> Result<UpdateOutcome, HomeDashError> {
        let on = !self.device(id)?.state;
        self.set_power(id, on).await
    }

    /// Change a thermostat's mode. Selecting the current mode is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when the device is not a
    /// thermostat or is powered off, plus the lookup errors of
    /// [`Dashboard::set_power`].
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub async fn set_mode(
        &self,
        id: &DeviceId,
        mode: ThermostatMode,
    ) -> Result<UpdateOutcome, HomeDashError> {
        self.run_optimistic(id, |device| {
            let current = device
                .field(Field::Mode)
                .ok_or_else(|| ValidationError::UnsupportedField {
                    id: id.to_string(),
                    field: Field::Mode,
                })?;
            if current == FieldValue::Mode(mode) {
                return Ok(None);
            }
            ensure_powered(device)?;
            Ok(Some(OptimisticUpdate {
                field: Field::Mode,
                value: FieldValue::Mode(mode),
                action: "mode",
                payload: mode.to_string().into(),
                on_success: Notification::success(
                    "Mode Updated",
                    format!("{} mode set to {}", device.name, mode.label()),
                ),
                on_failure: failure("mode"),
            }))
        })
        .await
    }

    /// Apply a security action (arm, disarm, lock, unlock, test, reset).
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when the action does not fit the
    /// device or the device is powered off, plus the lookup errors of
    /// [`Dashboard::set_power`].
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub async fn security_action(
        &self,
        id: &DeviceId,
        action: SecurityAction,
    ) -> Result<UpdateOutcome, HomeDashError> {
        self.run_optimistic(id, |device| {
            if !action.applies_to(device) {
                return Err(ValidationError::UnsupportedAction {
                    id: id.to_string(),
                    action: action.to_string(),
                }
                .into());
            }
            ensure_powered(device)?;
            let (field, value) = action.target();
            Ok(Some(OptimisticUpdate {
                field,
                value: FieldValue::Flag(value),
                action: action.as_str(),
                payload: true.into(),
                on_success: security_notice(device, action),
                on_failure: failure("security"),
            }))
        })
        .await
    }

    /// Apply a camera action.
    ///
    /// `record` flips the recording flag through the optimistic protocol;
    /// `snapshot` changes nothing locally and only reports the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when the device is not a camera
    /// or is powered off, plus the lookup errors of [`Dashboard::set_power`].
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub async fn camera_action(
        &self,
        id: &DeviceId,
        action: CameraAction,
    ) -> Result<UpdateOutcome, HomeDashError> {
        match action {
            CameraAction::Record => {
                self.run_optimistic(id, |device| {
                    let DeviceKind::Camera { recording } = device.kind() else {
                        return Err(unsupported_camera(id, action));
                    };
                    ensure_powered(device)?;
                    let recording = !recording;
                    Ok(Some(OptimisticUpdate {
                        field: Field::Recording,
                        value: FieldValue::Flag(recording),
                        action: action.as_str(),
                        payload: true.into(),
                        on_success: Notification::success(
                            "Camera Updated",
                            format!(
                                "{} recording {}",
                                device.name,
                                if recording { "started" } else { "stopped" }
                            ),
                        ),
                        on_failure: failure("camera"),
                    }))
                })
                .await
            }
            CameraAction::Snapshot => {
                let name = {
                    let mut state = self.lock_state();
                    let device = state.ready_registry()?.require(id)?;
                    if !matches!(device.kind(), DeviceKind::Camera { .. }) {
                        return Err(unsupported_camera(id, action));
                    }
                    ensure_powered(device)?;
                    device.name.clone()
                };
                let command = Command::new(id.clone(), action.as_str(), true);
                if self.confirm(command).await {
                    self.notifier.notify(Notification::success(
                        "Snapshot Taken",
                        format!("Snapshot from {name} saved"),
                    ));
                    Ok(UpdateOutcome::Committed)
                } else {
                    self.notifier.notify(failure("camera"));
                    Ok(UpdateOutcome::Rejected)
                }
            }
        }
    }

    /// Record an intermediate brightness value from a light's slider.
    ///
    /// The registry is updated and rendered immediately; the command is sent
    /// once the slider has been idle for the debounce window. No
    /// notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] for an out-of-range value, a
    /// non-light device, or a powered-off light, plus the lookup errors of
    /// [`Dashboard::set_power`].
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub fn adjust_brightness(&self, id: &DeviceId, brightness: u8) -> Result<(), HomeDashError> {
        self.adjust_level(id, Field::Brightness, "brightness", brightness)
    }

    /// Record an intermediate temperature setpoint from a thermostat's
    /// slider. Behaves like [`Dashboard::adjust_brightness`].
    ///
    /// # Errors
    ///
    /// Same as [`Dashboard::adjust_brightness`] for thermostats.
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub fn adjust_temperature(&self, id: &DeviceId, temperature: u8) -> Result<(), HomeDashError> {
        self.adjust_level(id, Field::Temperature, "temperature", temperature)
    }

    /// Slider released: confirm the settled brightness once.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] for a non-light device, plus the
    /// lookup errors of [`Dashboard::set_power`].
    pub fn finish_brightness(&self, id: &DeviceId) -> Result<(), HomeDashError> {
        let (name, brightness) = self.settled_level(id, Field::Brightness)?;
        self.notifier.notify(Notification::success(
            "Brightness Updated",
            format!("{name} brightness set to {brightness}%"),
        ));
        Ok(())
    }

    /// Slider released: confirm the settled temperature once.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] for a non-thermostat device, plus
    /// the lookup errors of [`Dashboard::set_power`].
    pub fn finish_temperature(&self, id: &DeviceId) -> Result<(), HomeDashError> {
        let (name, temperature) = self.settled_level(id, Field::Temperature)?;
        self.notifier.notify(Notification::success(
            "Temperature Updated",
            format!("{name} temperature set to {temperature}°F"),
        ));
        Ok(())
    }

    async fn run_optimistic<P>(&self, id: &DeviceId, plan: P) -> Result<UpdateOutcome, HomeDashError>
    where
        P: FnOnce(&Device) -> Result<Option<OptimisticUpdate>, HomeDashError> + Send,
    {
        let (update, token) = {
            let mut state = self.lock_state();
            let registry = state.ready_registry()?;
            let Some(update) = plan(registry.require(id)?)? else {
                tracing::debug!("value unchanged, nothing to send");
                return Ok(UpdateOutcome::Unchanged);
            };
            let previous = registry.set_field(id, update.field, update.value)?;
            let token = state
                .in_flight
                .begin((id.clone(), update.field), previous);
            self.render_locked(&state);
            (update, token)
        };

        let pending = PendingWrite {
            dashboard: self,
            key: (id.clone(), update.field),
            token,
            written: update.value,
            on_failure: Some(update.on_failure),
        };
        let command = Command::new(id.clone(), update.action, update.payload);
        let confirmed = self.confirm(command).await;
        let on_failure = pending.disarm();

        let outcome = self.resolve_write(&(id.clone(), update.field), token, confirmed, update.value);
        match outcome {
            UpdateOutcome::RolledBack => {
                tracing::info!(field = %update.field, "update rolled back");
                if let Some(notification) = on_failure {
                    self.notifier.notify(notification);
                }
            }
            UpdateOutcome::Committed => {
                tracing::info!(field = %update.field, value = %update.value, "update committed");
                self.notifier.notify(update.on_success);
            }
            UpdateOutcome::Rejected | UpdateOutcome::Unchanged | UpdateOutcome::Superseded => {}
        }
        Ok(outcome)
    }

    /// Settle one in-flight write: keep it, restore the baseline, or leave the
    /// registry alone when a newer write owns the field.
    fn resolve_write(
        &self,
        key: &(DeviceId, Field),
        token: u64,
        confirmed: bool,
        written: FieldValue,
    ) -> UpdateOutcome {
        let (id, field) = key;
        let mut state = self.lock_state();
        match state.in_flight.resolve(key, token, confirmed, written) {
            Resolution::Commit => UpdateOutcome::Committed,
            Resolution::RollBack(baseline) => {
                if let Err(err) = state.registry.set_field(id, *field, baseline) {
                    tracing::error!(error = %err, %field, "failed to restore field");
                }
                self.render_locked(&state);
                UpdateOutcome::RolledBack
            }
            Resolution::Stale => {
                tracing::debug!(%field, confirmed, "stale resolution discarded");
                UpdateOutcome::Superseded
            }
        }
    }

    /// Send `command`, folding rejections and transport faults into `false`.
    #[tracing::instrument(skip_all, fields(action = %command.action))]
    async fn confirm(&self, command: Command) -> bool {
        match self.executor.execute(command).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("command rejected");
                false
            }
            Err(err) => {
                tracing::error!(error = %err, "command failed");
                false
            }
        }
    }

    fn adjust_level(
        &self,
        id: &DeviceId,
        field: Field,
        action: &'static str,
        value: u8,
    ) -> Result<(), HomeDashError> {
        {
            let mut state = self.lock_state();
            let registry = state.ready_registry()?;
            let device = registry.require(id)?;
            if device.field(field).is_none() {
                return Err(ValidationError::UnsupportedField {
                    id: id.to_string(),
                    field,
                }
                .into());
            }
            ensure_powered(device)?;
            registry.set_field(id, field, FieldValue::Level(value))?;
            self.render_locked(&state);
        }

        let executor = Arc::clone(&self.executor);
        let command = Command::new(id.clone(), action, value);
        self.debouncer.schedule((id.clone(), field), async move {
            let device_id = command.device_id.clone();
            match executor.execute(command).await {
                Ok(true) => tracing::debug!(%device_id, action, value, "debounced command sent"),
                Ok(false) => tracing::warn!(%device_id, action, value, "debounced command rejected"),
                Err(err) => {
                    tracing::error!(%device_id, action, value, error = %err, "debounced command failed");
                }
            }
        });
        Ok(())
    }

    fn settled_level(&self, id: &DeviceId, field: Field) -> Result<(String, u8), HomeDashError> {
        let mut state = self.lock_state();
        let device = state.ready_registry()?.require(id)?;
        let value = level(device, field).ok_or_else(|| ValidationError::UnsupportedField {
            id: id.to_string(),
            field,
        })?;
        Ok((device.name.clone(), value))
    }
}

fn security_notice(device: &Device, action: SecurityAction) -> Notification {
    let name = &device.name;
    match action {
        SecurityAction::Arm => {
            Notification::success("Security Updated", format!("{name} is now armed"))
        }
        SecurityAction::Disarm => {
            Notification::success("Security Updated", format!("{name} is now disarmed"))
        }
        SecurityAction::Lock => {
            Notification::success("Security Updated", format!("{name} are now locked"))
        }
        SecurityAction::Unlock => {
            Notification::success("Security Updated", format!("{name} are now unlocked"))
        }
        SecurityAction::Test => {
            Notification::error("Security Alert", format!("{name} have been triggered!"))
        }
        SecurityAction::Reset => {
            Notification::success("Security Updated", format!("{name} have been reset"))
        }
    }
}

fn unsupported_camera(id: &DeviceId, action: CameraAction) -> HomeDashError {
    ValidationError::UnsupportedAction {
        id: id.to_string(),
        action: action.to_string(),
    }
    .into()
}
