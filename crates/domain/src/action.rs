//! User actions on security units and cameras.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind};
use crate::error::ValidationError;
use crate::field::Field;

/// Action available on a security unit.
///
/// Each action sets exactly one boolean field to a fixed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityAction {
    Arm,
    Disarm,
    Lock,
    Unlock,
    Test,
    Reset,
}

impl SecurityAction {
    pub const ALL: [Self; 6] = [
        Self::Arm,
        Self::Disarm,
        Self::Lock,
        Self::Unlock,
        Self::Test,
        Self::Reset,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Disarm => "disarm",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Test => "test",
            Self::Reset => "reset",
        }
    }

    /// The field written by this action and the literal written to it.
    #[must_use]
    pub fn target(self) -> (Field, bool) {
        match self {
            Self::Arm => (Field::Armed, true),
            Self::Disarm => (Field::Armed, false),
            Self::Lock => (Field::Locked, true),
            Self::Unlock => (Field::Locked, false),
            Self::Test => (Field::Triggered, true),
            Self::Reset => (Field::Triggered, false),
        }
    }

    /// Whether `device` carries the field this action writes.
    #[must_use]
    pub fn applies_to(self, device: &Device) -> bool {
        device.field(self.target().0).is_some()
    }

    /// Actions a card offers for `device` in its current state.
    ///
    /// Alarms and locks always offer both directions; a sensor offers
    /// `test` when idle and `reset` once triggered.
    #[must_use]
    pub fn offered_for(device: &Device) -> Vec<Self> {
        match device.kind() {
            DeviceKind::Alarm { .. } => vec![Self::Arm, Self::Disarm],
            DeviceKind::Lock { .. } => vec![Self::Lock, Self::Unlock],
            DeviceKind::Sensor { triggered: true } => vec![Self::Reset],
            DeviceKind::Sensor { triggered: false } => vec![Self::Test],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for SecurityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ValidationError::Unknown {
                kind: "security action",
                value: s.to_string(),
            })
    }
}

/// Action available on a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraAction {
    /// Flip the `recording` flag.
    Record,
    /// Capture a still frame; mutates nothing.
    Snapshot,
}

impl CameraAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for CameraAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "record" => Ok(Self::Record),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(ValidationError::Unknown {
                kind: "camera action",
                value: other.to_string(),
            }),
        }
    }
}
