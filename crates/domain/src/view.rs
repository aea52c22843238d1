//! View state: the selected room filter and the active tab.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::Category;
use crate::error::ValidationError;
use crate::room::RoomFilter;

/// A dashboard pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Lights,
    Climate,
    Security,
    Cameras,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Lights,
        Self::Climate,
        Self::Security,
        Self::Cameras,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Lights => "lights",
            Self::Climate => "climate",
            Self::Security => "security",
            Self::Cameras => "cameras",
        }
    }

    /// The device category this pane lists, if it is a category pane.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Overview => None,
            Self::Lights => Some(Category::Lights),
            Self::Climate => Some(Category::Thermostats),
            Self::Security => Some(Category::Security),
            Self::Cameras => Some(Category::Cameras),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::Unknown {
                kind: "tab",
                value: s.to_string(),
            })
    }
}

/// Visibility of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    pub tab: Tab,
    pub visible: bool,
}

/// Registry population progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// The load failed; the dashboard stays empty until restart.
    Failed,
}

/// Selected room and active tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub current_room: RoomFilter,
    pub current_tab: Tab,
}

impl ViewState {
    /// Select a room. Returns whether the selection changed.
    pub fn set_room(&mut self, room: RoomFilter) -> bool {
        let changed = self.current_room != room;
        self.current_room = room;
        changed
    }

    /// Select a tab. Returns whether the selection changed.
    pub fn set_tab(&mut self, tab: Tab) -> bool {
        let changed = self.current_tab != tab;
        self.current_tab = tab;
        changed
    }

    /// Every pane with its visibility; exactly one is visible.
    #[must_use]
    pub fn panes(&self) -> Vec<Pane> {
        Tab::ALL
            .into_iter()
            .map(|tab| Pane {
                tab,
                visible: tab == self.current_tab,
            })
            .collect()
    }
}
