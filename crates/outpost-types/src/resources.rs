//! Per-kind records.
//!
//! [`ResourceMap`] has exactly one field per [`ResourceKind`]. Lookups are
//! exhaustive matches, so adding a kind is a compile error everywhere a
//! value is missing for it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ResourceKind;

/// A value for each of the four resource kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceMap<T> {
    /// Value for [`ResourceKind::Wood`].
    pub wood: T,
    /// Value for [`ResourceKind::Clay`].
    pub clay: T,
    /// Value for [`ResourceKind::Iron`].
    pub iron: T,
    /// Value for [`ResourceKind::Crop`].
    pub crop: T,
}

impl<T> ResourceMap<T> {
    /// Build a map from explicit per-kind values.
    pub const fn new(wood: T, clay: T, iron: T, crop: T) -> Self {
        Self {
            wood,
            clay,
            iron,
            crop,
        }
    }

    /// Build a map by calling `f` once per kind, in canonical order.
    pub fn from_fn(mut f: impl FnMut(ResourceKind) -> T) -> Self {
        let wood = f(ResourceKind::Wood);
        let clay = f(ResourceKind::Clay);
        let iron = f(ResourceKind::Iron);
        let crop = f(ResourceKind::Crop);
        Self::new(wood, clay, iron, crop)
    }

    /// Borrow the value for `kind`.
    pub const fn get(&self, kind: ResourceKind) -> &T {
        match kind {
            ResourceKind::Wood => &self.wood,
            ResourceKind::Clay => &self.clay,
            ResourceKind::Iron => &self.iron,
            ResourceKind::Crop => &self.crop,
        }
    }

    /// Mutably borrow the value for `kind`.
    pub const fn get_mut(&mut self, kind: ResourceKind) -> &mut T {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Clay => &mut self.clay,
            ResourceKind::Iron => &mut self.iron,
            ResourceKind::Crop => &mut self.crop,
        }
    }

    /// Iterate `(kind, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &T)> + '_ {
        ResourceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Apply `f` to every value, keeping the kind association.
    pub fn map<U>(&self, mut f: impl FnMut(ResourceKind, &T) -> U) -> ResourceMap<U> {
        ResourceMap::from_fn(|kind| f(kind, self.get(kind)))
    }
}

impl<T: Copy> ResourceMap<T> {
    /// A map with the same value for every kind.
    pub const fn splat(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_matches_fields() {
        let map = ResourceMap::new(1, 2, 3, 4);
        let values: Vec<i32> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [1, 2, 3, 4]);
        assert_eq!(*map.get(ResourceKind::Iron), 3);
    }

    #[test]
    fn get_mut_updates_single_kind() {
        let mut map = ResourceMap::splat(0_u32);
        *map.get_mut(ResourceKind::Crop) = 9;
        assert_eq!(map, ResourceMap::new(0, 0, 0, 9));
    }

    #[test]
    fn map_keeps_kind_association() {
        let map = ResourceMap::from_fn(|kind| kind.as_str().len());
        let doubled = map.map(|kind, len| (kind, len.saturating_mul(2)));
        assert_eq!(doubled.crop, (ResourceKind::Crop, 8));
    }

    #[test]
    fn serializes_as_object_with_fixed_keys() {
        let map = ResourceMap::new(10_u32, 20, 30, 40);
        let json = serde_json::to_value(map).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"wood": 10, "clay": 20, "iron": 30, "crop": 40}))
        );
    }
}
