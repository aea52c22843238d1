//! Room filter: which room's devices the dashboard shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::ValidationError;

const ALL: &str = "all";

/// The room selector: every room, or one room tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoomFilter {
    #[default]
    All,
    Room(String),
}

impl RoomFilter {
    /// Whether `device` passes this filter.
    ///
    /// Room-agnostic devices (security units) always pass.
    #[must_use]
    pub fn admits(&self, device: &Device) -> bool {
        match (self, device.room.as_deref()) {
            (Self::All, _) | (_, None) => true,
            (Self::Room(selected), Some(room)) => selected == room,
        }
    }

    /// Badge label: `All Rooms`, or the tag with its first letter capitalised.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Rooms".to_string(),
            Self::Room(room) => {
                let mut chars = room.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            }
        }
    }
}

impl fmt::Display for RoomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Room(room) => f.write_str(room),
        }
    }
}

impl FromStr for RoomFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ValidationError::Unknown {
                kind: "room",
                value: s.to_string(),
            }),
            ALL => Ok(Self::All),
            room => Ok(Self::Room(room.to_string())),
        }
    }
}

impl TryFrom<String> for RoomFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoomFilter> for String {
    fn from(value: RoomFilter) -> Self {
        value.to_string()
    }
}
