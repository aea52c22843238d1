//! Dashboard projection: what a renderer draws for the current
//! registry + view state.

use serde::Serialize;

use crate::action::SecurityAction;
use crate::device::{Category, Device};
use crate::registry::DeviceRegistry;
use crate::room::RoomFilter;
use crate::view::{LoadState, Pane, Tab, ViewState};

/// Number of devices previewed on an overview card.
pub const OVERVIEW_PREVIEW: usize = 2;

/// One device card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCard {
    #[serde(flatten)]
    pub device: Device,
    /// Secondary controls (sliders, mode, actions) are disabled while the
    /// device is powered off.
    pub controls_enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SecurityAction>,
}

impl DeviceCard {
    fn new(device: &Device) -> Self {
        Self {
            device: device.clone(),
            controls_enabled: device.state,
            actions: SecurityAction::offered_for(device),
        }
    }
}

/// Overview card for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub active: usize,
    pub total: usize,
    pub preview: Vec<DeviceCard>,
}

impl CategorySummary {
    fn new(category: Category, devices: &[&Device]) -> Self {
        Self {
            category,
            active: devices.iter().filter(|d| d.state).count(),
            total: devices.len(),
            preview: devices
                .iter()
                .take(OVERVIEW_PREVIEW)
                .map(|d| DeviceCard::new(d))
                .collect(),
        }
    }

    /// `"<active> of <total> active"`.
    #[must_use]
    pub fn status(&self) -> String {
        format!("{} of {} active", self.active, self.total)
    }
}

/// Full render input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub load_state: LoadState,
    pub room: RoomFilter,
    pub room_label: String,
    pub tab: Tab,
    pub panes: Vec<Pane>,
    pub overview: Vec<CategorySummary>,
    pub lights: Vec<DeviceCard>,
    pub thermostats: Vec<DeviceCard>,
    pub security: Vec<DeviceCard>,
    pub cameras: Vec<DeviceCard>,
}

impl DashboardView {
    /// Project `registry` through `view`.
    #[must_use]
    pub fn project(registry: &DeviceRegistry, view: &ViewState, load_state: LoadState) -> Self {
        let room = &view.current_room;
        let cards = |category| -> Vec<DeviceCard> {
            registry
                .filtered(category, room)
                .into_iter()
                .map(DeviceCard::new)
                .collect()
        };

        let overview = [Category::Lights, Category::Thermostats, Category::Security]
            .into_iter()
            .map(|category| {
                let devices = registry.filtered(category, room);
                CategorySummary::new(category, &devices)
            })
            .collect();

        Self {
            load_state,
            room: room.clone(),
            room_label: room.label(),
            tab: view.current_tab,
            panes: view.panes(),
            overview,
            lights: cards(Category::Lights),
            thermostats: cards(Category::Thermostats),
            security: cards(Category::Security),
            cameras: cards(Category::Cameras),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceKind, ThermostatMode};

    fn registry() -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        for (id, room, state) in [
            ("light-1", "living", true),
            ("light-2", "kitchen", false),
            ("light-3", "bedroom", true),
        ] {
            registry
                .insert(
                    Device::builder()
                        .id(id)
                        .name(id)
                        .room(room)
                        .state(state)
                        .kind(DeviceKind::Light { brightness: 50 })
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        registry
            .insert(
                Device::builder()
                    .id("therm-1")
                    .name("Living Room")
                    .room("living")
                    .state(false)
                    .kind(DeviceKind::Thermostat {
                        temperature: 72,
                        mode: ThermostatMode::Heat,
                    })
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
            .insert(
                Device::builder()
                    .id("sec-3")
                    .name("Motion Sensors")
                    .state(true)
                    .kind(DeviceKind::Sensor { triggered: false })
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn should_count_active_devices_in_overview() {
        let view = DashboardView::project(&registry(), &ViewState::default(), LoadState::Ready);
        let lights = &view.overview[0];
        assert_eq!(lights.category, Category::Lights);
        assert_eq!(lights.status(), "2 of 3 active");
        assert_eq!(lights.preview.len(), OVERVIEW_PREVIEW);
    }

    #[test]
    fn should_filter_cards_by_selected_room() {
        let mut state = ViewState::default();
        state.set_room("living".parse().unwrap());
        let view = DashboardView::project(&registry(), &state, LoadState::Ready);
        assert_eq!(view.lights.len(), 1);
        assert_eq!(view.thermostats.len(), 1);
        assert_eq!(view.security.len(), 1);
        assert_eq!(view.room_label, "Living");
    }

    #[test]
    fn should_summarise_empty_category_with_zero_counts() {
        let mut state = ViewState::default();
        state.set_room("garage".parse().unwrap());
        let view = DashboardView::project(&registry(), &state, LoadState::Ready);
        assert_eq!(view.overview[1].category, Category::Thermostats);
        assert_eq!(view.overview[1].status(), "0 of 0 active");
    }

    #[test]
    fn should_disable_controls_for_powered_off_devices() {
        let view = DashboardView::project(&registry(), &ViewState::default(), LoadState::Ready);
        assert!(!view.thermostats[0].controls_enabled);
        assert_eq!(view.security[0].actions, vec![SecurityAction::Test]);
    }

    #[test]
    fn should_expose_one_visible_pane() {
        let mut state = ViewState::default();
        state.set_tab(Tab::Security);
        let view = DashboardView::project(&registry(), &state, LoadState::Ready);
        assert_eq!(view.panes.iter().filter(|p| p.visible).count(), 1);
        assert!(view.panes.iter().any(|p| p.visible && p.tab == Tab::Security));
    }
}
