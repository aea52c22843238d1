//! Command: one request sent to a device transport.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// A single device-control request: which device, what action, what value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub device_id: DeviceId,
    /// Action name understood by the transport (`toggle`, `mode`, `arm`, …).
    pub action: String,
    pub value: serde_json::Value,
}

impl Command {
    #[must_use]
    pub fn new(
        device_id: DeviceId,
        action: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            device_id,
            action: action.into(),
            value: value.into(),
        }
    }
}
