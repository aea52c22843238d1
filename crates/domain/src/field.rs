//! Field selectors: the individually mutable attributes of a device.
//!
//! Every remotely confirmed mutation reads a [`FieldValue`] snapshot through
//! [`Device::field`] and writes through [`Device::set_field`], so the same
//! snapshot can be written back verbatim on rollback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{BRIGHTNESS_RANGE, Device, DeviceKind, TEMPERATURE_RANGE, ThermostatMode};
use crate::error::ValidationError;

/// A mutable attribute of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Power,
    Brightness,
    Temperature,
    Mode,
    Recording,
    Armed,
    Locked,
    Triggered,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Power => "power",
            Self::Brightness => "brightness",
            Self::Temperature => "temperature",
            Self::Mode => "mode",
            Self::Recording => "recording",
            Self::Armed => "armed",
            Self::Locked => "locked",
            Self::Triggered => "triggered",
        })
    }
}

/// The value held by a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Level(u8),
    Mode(ThermostatMode),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(v) => v.fmt(f),
            Self::Level(v) => v.fmt(f),
            Self::Mode(v) => v.fmt(f),
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Flag(v) => Self::Bool(v),
            FieldValue::Level(v) => Self::from(v),
            FieldValue::Mode(v) => Self::String(v.to_string()),
        }
    }
}

impl Device {
    /// Read the current value of `field`, or `None` if this variant does not
    /// carry it.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<FieldValue> {
        match (field, &self.kind) {
            (Field::Power, _) => Some(FieldValue::Flag(self.state)),
            (Field::Brightness, DeviceKind::Light { brightness }) => {
                Some(FieldValue::Level(*brightness))
            }
            (Field::Temperature, DeviceKind::Thermostat { temperature, .. }) => {
                Some(FieldValue::Level(*temperature))
            }
            (Field::Mode, DeviceKind::Thermostat { mode, .. }) => Some(FieldValue::Mode(*mode)),
            (Field::Recording, DeviceKind::Camera { recording }) => {
                Some(FieldValue::Flag(*recording))
            }
            (Field::Armed, DeviceKind::Alarm { armed }) => Some(FieldValue::Flag(*armed)),
            (Field::Locked, DeviceKind::Lock { locked }) => Some(FieldValue::Flag(*locked)),
            (Field::Triggered, DeviceKind::Sensor { triggered }) => {
                Some(FieldValue::Flag(*triggered))
            }
            _ => None,
        }
    }

    /// Overwrite `field` with `value`, leaving every other attribute intact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedField`] when the variant has no
    /// such field, [`ValidationError::InvalidValue`] when the value has the
    /// wrong shape, and a range error for out-of-bounds levels.
    pub fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        };
        let unsupported = || ValidationError::UnsupportedField {
            id: self.id.to_string(),
            field,
        };

        if self.field(field).is_none() {
            return Err(unsupported());
        }

        match (field, &mut self.kind, value) {
            (Field::Power, _, FieldValue::Flag(v)) => self.state = v,
            (Field::Brightness, DeviceKind::Light { brightness }, FieldValue::Level(v)) => {
                if !BRIGHTNESS_RANGE.contains(&v) {
                    return Err(ValidationError::BrightnessOutOfRange(v));
                }
                *brightness = v;
            }
            (
                Field::Temperature,
                DeviceKind::Thermostat { temperature, .. },
                FieldValue::Level(v),
            ) => {
                if !TEMPERATURE_RANGE.contains(&v) {
                    return Err(ValidationError::TemperatureOutOfRange(v));
                }
                *temperature = v;
            }
            (Field::Mode, DeviceKind::Thermostat { mode, .. }, FieldValue::Mode(v)) => *mode = v,
            (Field::Recording, DeviceKind::Camera { recording }, FieldValue::Flag(v))
            | (Field::Armed, DeviceKind::Alarm { armed: recording }, FieldValue::Flag(v))
            | (Field::Locked, DeviceKind::Lock { locked: recording }, FieldValue::Flag(v))
            | (Field::Triggered, DeviceKind::Sensor { triggered: recording }, FieldValue::Flag(v)) => {
                *recording = v;
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}
