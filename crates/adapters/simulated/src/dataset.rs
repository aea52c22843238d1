//! The demo household served by [`MockDeviceSource`](crate::MockDeviceSource).

use homedash_domain::device::{Category, Device, DeviceKind, ThermostatMode};
use homedash_domain::error::HomeDashError;
use homedash_domain::registry::DeviceRegistry;

fn device(
    id: &str,
    name: &str,
    room: Option<&str>,
    state: bool,
    kind: DeviceKind,
) -> Result<Device, HomeDashError> {
    let builder = Device::builder().id(id).name(name).state(state).kind(kind);
    match room {
        Some(room) => builder.room(room),
        None => builder,
    }
    .build()
}

fn light(id: &str, name: &str, room: &str, state: bool, brightness: u8) -> Result<Device, HomeDashError> {
    device(id, name, Some(room), state, DeviceKind::Light { brightness })
}

fn thermostat(
    id: &str,
    name: &str,
    room: &str,
    temperature: u8,
    mode: ThermostatMode,
) -> Result<Device, HomeDashError> {
    device(
        id,
        name,
        Some(room),
        true,
        DeviceKind::Thermostat { temperature, mode },
    )
}

fn camera(id: &str, name: &str, room: &str, state: bool, recording: bool) -> Result<Device, HomeDashError> {
    device(id, name, Some(room), state, DeviceKind::Camera { recording })
}

/// Four lights, two thermostats, three cameras and three security units.
///
/// # Errors
///
/// Returns a validation error if a hardcoded record breaks a domain
/// invariant.
pub fn demo_registry() -> Result<DeviceRegistry, HomeDashError> {
    let lights = vec![
        light("light-1", "Living Room", "living", true, 80)?,
        light("light-2", "Kitchen", "kitchen", false, 60)?,
        light("light-3", "Bedroom", "bedroom", true, 40)?,
        light("light-4", "Bathroom", "bathroom", false, 70)?,
    ];
    let thermostats = vec![
        thermostat("therm-1", "Living Room", "living", 72, ThermostatMode::Heat)?,
        thermostat("therm-2", "Bedroom", "bedroom", 68, ThermostatMode::Cool)?,
    ];
    let cameras = vec![
        camera("cam-1", "Front Door", "exterior", true, false)?,
        camera("cam-2", "Back Yard", "exterior", true, true)?,
        camera("cam-3", "Garage", "garage", false, false)?,
    ];
    let security = vec![
        device("sec-1", "Alarm System", None, true, DeviceKind::Alarm { armed: true })?,
        device("sec-2", "Door Locks", None, true, DeviceKind::Lock { locked: true })?,
        device(
            "sec-3",
            "Motion Sensors",
            None,
            true,
            DeviceKind::Sensor { triggered: false },
        )?,
    ];

    Ok(DeviceRegistry::from_categories([
        (Category::Lights, lights),
        (Category::Thermostats, thermostats),
        (Category::Cameras, cameras),
        (Category::Security, security),
    ])?)
}
