//! Device: a controllable smart-home device shown as a dashboard card.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HomeDashError, ValidationError};
use crate::id::DeviceId;

/// Valid light brightness, in percent.
pub const BRIGHTNESS_RANGE: RangeInclusive<u8> = 1..=100;

/// Valid thermostat set-point, in °F.
pub const TEMPERATURE_RANGE: RangeInclusive<u8> = 60..=85;

/// Dashboard category a device is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lights,
    Thermostats,
    Cameras,
    Security,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [Self::Lights, Self::Thermostats, Self::Cameras, Self::Security];

    /// Whether devices in this category are filtered by room.
    #[must_use]
    pub fn is_room_scoped(self) -> bool {
        !matches!(self, Self::Security)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lights => "lights",
            Self::Thermostats => "thermostats",
            Self::Cameras => "cameras",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::Unknown {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Thermostat operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    Heat,
    Cool,
}

impl ThermostatMode {
    /// Human label used in cards and notifications.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Heat => "Heating",
            Self::Cool => "Cooling",
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heat => f.write_str("heat"),
            Self::Cool => f.write_str("cool"),
        }
    }
}

impl FromStr for ThermostatMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            other => Err(ValidationError::Unknown {
                kind: "mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Variant-specific attributes of a device.
///
/// Dependent attributes keep their last value while the device is powered
/// off; they are only contextually disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceKind {
    Light { brightness: u8 },
    Thermostat { temperature: u8, mode: ThermostatMode },
    Camera { recording: bool },
    Alarm { armed: bool },
    Lock { locked: bool },
    Sensor { triggered: bool },
}

impl DeviceKind {
    /// The category this variant is listed under.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Light { .. } => Category::Lights,
            Self::Thermostat { .. } => Category::Thermostats,
            Self::Camera { .. } => Category::Cameras,
            Self::Alarm { .. } | Self::Lock { .. } | Self::Sensor { .. } => Category::Security,
        }
    }
}

/// A device record held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub(crate) id: DeviceId,
    pub name: String,
    /// Power / online flag.
    pub state: bool,
    /// Room tag; always `None` for security devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(flatten)]
    pub(crate) kind: DeviceKind,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the id or name is blank, a ranged
    /// attribute is out of bounds, or the room tag does not match the
    /// device's category.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.id.is_valid() {
            return Err(ValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        match &self.kind {
            DeviceKind::Light { brightness } if !BRIGHTNESS_RANGE.contains(brightness) => {
                return Err(ValidationError::BrightnessOutOfRange(*brightness));
            }
            DeviceKind::Thermostat { temperature, .. }
                if !TEMPERATURE_RANGE.contains(temperature) =>
            {
                return Err(ValidationError::TemperatureOutOfRange(*temperature));
            }
            _ => {}
        }
        match (self.category().is_room_scoped(), self.room.as_deref()) {
            (false, Some(_)) => Err(ValidationError::UnexpectedRoom),
            (true, None) => Err(ValidationError::MissingRoom),
            (true, Some(room)) if room.trim().is_empty() => Err(ValidationError::MissingRoom),
            _ => Ok(()),
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    state: bool,
    room: Option<String>,
    kind: Option<DeviceKind>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: bool) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if the id, name or kind is
    /// missing, or any invariant checked by [`Device::validate`] fails.
    pub fn build(self) -> Result<Device, HomeDashError> {
        let kind = self.kind.ok_or(ValidationError::Unknown {
            kind: "device kind",
            value: String::new(),
        })?;
        let device = Device {
            id: self.id.ok_or(ValidationError::EmptyId)?,
            name: self.name.unwrap_or_default(),
            state: self.state,
            room: self.room,
            kind,
        };
        device.validate()?;
        Ok(device)
    }
}
