//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeDashError`] via `#[from]`.

use crate::device::Category;
use crate::field::Field;

/// Base error for every fallible homedash operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeDashError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The device registry has not been populated (still loading, or the
    /// load failed).
    #[error("device registry is not loaded")]
    NotLoaded,

    /// Fault raised by a device transport or registry provider.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HomeDashError {
    /// Wrap any error coming out of an adapter into [`HomeDashError::Transport`].
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyId,

    #[error("name must not be empty")]
    EmptyName,

    #[error("brightness {0} is outside 1..=100")]
    BrightnessOutOfRange(u8),

    #[error("temperature {0}°F is outside 60..=85")]
    TemperatureOutOfRange(u8),

    #[error("security devices are room-agnostic")]
    UnexpectedRoom,

    #[error("device must belong to a room")]
    MissingRoom,

    #[error("device {id} does not belong to category {category}")]
    CategoryMismatch { id: String, category: Category },

    #[error("device {0} already exists in its category")]
    DuplicateId(String),

    #[error("device {id} has no {field} field")]
    UnsupportedField { id: String, field: Field },

    #[error("{value} is not a valid {field} value")]
    InvalidValue { field: Field, value: String },

    #[error("action {action} is not available on device {id}")]
    UnsupportedAction { id: String, action: String },

    #[error("device {0} is powered off")]
    DeviceOff(String),

    #[error("unknown {kind}: {value}")]
    Unknown { kind: &'static str, value: String },
}

/// Returned when a looked-up item does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
