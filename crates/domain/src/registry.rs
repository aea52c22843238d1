//! Device registry: the in-memory category → device-list store.
//!
//! Populated once at startup and mutated in place afterwards. Devices are
//! never added or removed once loaded, and ids, variants and categories can
//! only be read: the sole write path is [`DeviceRegistry::set_field`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::device::{Category, Device};
use crate::error::{HomeDashError, NotFoundError, ValidationError};
use crate::field::{Field, FieldValue};
use crate::id::DeviceId;
use crate::room::RoomFilter;

/// Category-indexed, insertion-ordered device lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRegistry {
    categories: BTreeMap<Category, Vec<Device>>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from provider-shaped `(category, devices)` lists.
    ///
    /// # Errors
    ///
    /// Fails on the first device that is invalid, sits in the wrong
    /// category, or reuses an id.
    pub fn from_categories(
        lists: impl IntoIterator<Item = (Category, Vec<Device>)>,
    ) -> Result<Self, ValidationError> {
        let mut registry = Self::new();
        for (category, devices) in lists {
            for device in devices {
                registry.insert_into(category, device)?;
            }
        }
        Ok(registry)
    }

    /// Append a device to the category implied by its variant.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the device is invalid or its id is
    /// already taken.
    pub fn insert(&mut self, device: Device) -> Result<(), ValidationError> {
        self.insert_into(device.category(), device)
    }

    /// Append a device to an explicit category.
    ///
    /// Ids are kept unique across the whole registry so that a bare id
    /// identifies exactly one device.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CategoryMismatch`] when `category` differs
    /// from the device's variant, [`ValidationError::DuplicateId`] when the id
    /// is taken, or any error from [`Device::validate`].
    pub fn insert_into(&mut self, category: Category, device: Device) -> Result<(), ValidationError> {
        device.validate()?;
        if device.category() != category {
            return Err(ValidationError::CategoryMismatch {
                id: device.id().to_string(),
                category,
            });
        }
        if self.get(device.id()).is_some() {
            return Err(ValidationError::DuplicateId(device.id().to_string()));
        }
        self.categories.entry(category).or_default().push(device);
        Ok(())
    }

    /// Devices in `category`, in provider order.
    #[must_use]
    pub fn devices(&self, category: Category) -> &[Device] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Devices in `category` that pass `room`.
    #[must_use]
    pub fn filtered(&self, category: Category, room: &RoomFilter) -> Vec<&Device> {
        self.devices(category)
            .iter()
            .filter(|device| room.admits(device))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.categories
            .values()
            .flat_map(|devices| devices.iter())
            .find(|device| device.id() == id)
    }

    /// Look up a device, returning [`NotFoundError`] if absent.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown id.
    pub fn require(&self, id: &DeviceId) -> Result<&Device, HomeDashError> {
        self.get(id).ok_or_else(|| not_found(id))
    }

    /// Write `value` into `field` of device `id`, returning the value it
    /// replaced.
    ///
    /// Nothing is written when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown id or
    /// [`HomeDashError::Validation`] when the field or value is rejected.
    pub fn set_field(
        &mut self,
        id: &DeviceId,
        field: Field,
        value: FieldValue,
    ) -> Result<FieldValue, HomeDashError> {
        let device = self
            .categories
            .values_mut()
            .flat_map(|devices| devices.iter_mut())
            .find(|device| device.id() == id)
            .ok_or_else(|| not_found(id))?;
        let previous = device
            .field(field)
            .ok_or_else(|| ValidationError::UnsupportedField {
                id: id.to_string(),
                field,
            })?;
        device.set_field(field, value)?;
        Ok(previous)
    }

    /// Distinct room tags across every device.
    #[must_use]
    pub fn rooms(&self) -> BTreeSet<&str> {
        self.categories
            .values()
            .flat_map(|devices| devices.iter())
            .filter_map(|device| device.room.as_deref())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(id: &DeviceId) -> HomeDashError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;

    fn light(id: &str, room: &str, state: bool) -> Device {
        Device::builder()
            .id(id)
            .name(id)
            .room(room)
            .state(state)
            .kind(DeviceKind::Light { brightness: 60 })
            .build()
            .unwrap()
    }

    fn lock() -> Device {
        Device::builder()
            .id("sec-2")
            .name("Door Locks")
            .state(true)
            .kind(DeviceKind::Lock { locked: true })
            .build()
            .unwrap()
    }

    fn sample() -> DeviceRegistry {
        DeviceRegistry::from_categories([
            (
                Category::Lights,
                vec![
                    light("light-1", "living", true),
                    light("light-2", "kitchen", false),
                    light("light-3", "living", false),
                ],
            ),
            (Category::Security, vec![lock()]),
        ])
        .unwrap()
    }

    #[test]
    fn should_keep_provider_order_within_category() {
        let registry = sample();
        let ids: Vec<_> = registry
            .devices(Category::Lights)
            .iter()
            .map(|d| d.id().as_str())
            .collect();
        assert_eq!(ids, ["light-1", "light-2", "light-3"]);
    }

    #[test]
    fn should_filter_exactly_matching_room() {
        let registry = sample();
        let room: RoomFilter = "living".parse().unwrap();
        let filtered = registry.filtered(Category::Lights, &room);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|d| d.room.as_deref() == Some("living")));
    }

    #[test]
    fn should_return_all_devices_when_filter_is_all() {
        let registry = sample();
        assert_eq!(registry.filtered(Category::Lights, &RoomFilter::All).len(), 3);
    }

    #[test]
    fn should_keep_security_visible_under_room_filter() {
        let registry = sample();
        let room: RoomFilter = "kitchen".parse().unwrap();
        assert_eq!(registry.filtered(Category::Security, &room).len(), 1);
    }

    #[test]
    fn should_reject_duplicate_id() {
        let mut registry = sample();
        let result = registry.insert(light("light-1", "garage", true));
        assert_eq!(result, Err(ValidationError::DuplicateId("light-1".to_string())));
    }

    #[test]
    fn should_reject_device_in_wrong_category() {
        let mut registry = DeviceRegistry::new();
        let result = registry.insert_into(Category::Cameras, lock());
        assert!(matches!(result, Err(ValidationError::CategoryMismatch { .. })));
    }

    #[test]
    fn should_return_previous_value_when_setting_field() {
        let mut registry = sample();
        let id = DeviceId::new("light-2");
        let previous = registry
            .set_field(&id, Field::Power, FieldValue::Flag(true))
            .unwrap();
        assert_eq!(previous, FieldValue::Flag(false));
        assert!(registry.require(&id).unwrap().state);
    }

    #[test]
    fn should_return_not_found_for_unknown_device() {
        let mut registry = sample();
        let result = registry.set_field(&DeviceId::new("nope"), Field::Power, FieldValue::Flag(true));
        assert!(matches!(result, Err(HomeDashError::NotFound(_))));
    }

    #[test]
    fn should_leave_device_untouched_when_value_rejected() {
        let mut registry = sample();
        let id = DeviceId::new("light-1");
        let before = registry.require(&id).unwrap().clone();
        let result = registry.set_field(&id, Field::Brightness, FieldValue::Level(101));
        assert!(result.is_err());
        assert_eq!(registry.require(&id).unwrap(), &before);
    }

    #[test]
    fn should_list_distinct_rooms() {
        let registry = sample();
        let rooms: Vec<_> = registry.rooms().into_iter().collect();
        assert_eq!(rooms, ["kitchen", "living"]);
    }
}
