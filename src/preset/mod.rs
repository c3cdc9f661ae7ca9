use std::hash::{Hash, Hasher};
use std::io::Cursor;

use binrw::{BinRead, BinResult, BinWrite};
use chrono::{DateTime, Utc};

use crate::common::{
    coerce_zone_id, now_secs, read_fixed_point_position, time_from_timestamp, timestamp_from_time,
    write_fixed_point_position,
};
use crate::config::Localization;
use crate::ipc::{ActiveMarkers, FieldMarkerPreset, GamePosition};
use crate::waymark::{Waymark, WaymarkSlot};

mod describe;
pub use describe::ZoneNameResolver;

mod listeners;
pub use listeners::{ListenerHandle, ZoneIdListener};
use listeners::ZoneIdListeners;

mod persistence;
pub use persistence::{PresetDocument, SerializationPolicy, WaymarkDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// Tried to access a waymark slot outside of 0 to 7.
    IndexOutOfRange(i32),
    /// Tried to copy a preset from nothing.
    MissingSource,
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PresetError::IndexOutOfRange(index) => {
                write!(f, "Invalid waymark index \"{index}\", expected 0 to 7")
            }
            PresetError::MissingSource => write!(f, "There is no preset to copy from"),
        }
    }
}

impl std::error::Error for PresetError {}

/// A named, timestamped set of eight waymarks for a specific zone.
///
/// Equality and hashing only consider the waymarks and the zone id, two presets that only
/// differ in name or save time describe the same thing.
#[derive(Debug)]
pub struct WaymarkPreset {
    pub name: String,
    zone_id: u16,
    pub timestamp: DateTime<Utc>,
    waymarks: [Waymark; WaymarkSlot::COUNT],
    listeners: ZoneIdListeners,
}

impl Default for WaymarkPreset {
    fn default() -> Self {
        Self::new_localized(&Localization::default())
    }
}

impl Clone for WaymarkPreset {
    /// Copies everything except the listeners, which stay with the original.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            zone_id: self.zone_id,
            timestamp: self.timestamp,
            waymarks: self.waymarks,
            listeners: ZoneIdListeners::default(),
        }
    }
}

impl PartialEq for WaymarkPreset {
    fn eq(&self, other: &Self) -> bool {
        self.waymarks == other.waymarks && self.zone_id == other.zone_id
    }
}

impl Eq for WaymarkPreset {}

impl Hash for WaymarkPreset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.waymarks.hash(state);
        self.zone_id.hash(state);
    }
}

impl WaymarkPreset {
    /// Creates an empty preset, named with the localized default name.
    pub fn new_localized(localization: &Localization) -> Self {
        Self {
            name: localization.default_preset_name.clone(),
            zone_id: 0,
            timestamp: now_secs(),
            waymarks: WaymarkSlot::ALL.map(|slot| Waymark::new(slot as u8)),
            listeners: ZoneIdListeners::default(),
        }
    }

    /// Deep copies `source`. Copying from nothing is refused instead of producing a half-empty preset.
    pub fn copy_from(source: Option<&WaymarkPreset>) -> Result<Self, PresetError> {
        source.cloned().ok_or(PresetError::MissingSource)
    }

    /// Converts the host's representation into a preset. This never fails, but since the host
    /// doesn't store names the preset gets the default one.
    pub fn from_game_preset(game_preset: &FieldMarkerPreset) -> Self {
        Self::from_game_preset_localized(game_preset, &Localization::default())
    }

    pub fn from_game_preset_localized(
        game_preset: &FieldMarkerPreset,
        localization: &Localization,
    ) -> Self {
        let mut preset = Self::new_localized(localization);

        for (waymark, (index, game_position)) in preset
            .waymarks
            .iter_mut()
            .zip(game_preset.markers.iter().enumerate())
        {
            waymark.position =
                read_fixed_point_position([game_position.x, game_position.y, game_position.z]);
            waymark.active = game_preset
                .active_markers
                .contains(ActiveMarkers::for_index(index));
        }

        preset.zone_id = coerce_zone_id(game_preset.content_finder_condition_id.into());
        preset.timestamp = time_from_timestamp(game_preset.timestamp);

        preset
    }

    /// Converts this preset into the host's representation.
    /// Inactive waymarks are written at the origin, their stored position is lost.
    pub fn to_game_preset(&self) -> FieldMarkerPreset {
        let mut game_preset = FieldMarkerPreset::default();

        for (index, waymark) in self.waymarks.iter().enumerate() {
            if !waymark.active {
                continue;
            }

            let [x, y, z] = write_fixed_point_position(&waymark.position);
            game_preset.markers[index] = GamePosition { x, y, z };
            game_preset
                .active_markers
                .insert(ActiveMarkers::for_index(index));
        }

        game_preset.content_finder_condition_id = self.zone_id.into();
        game_preset.timestamp = timestamp_from_time(&self.timestamp);

        game_preset
    }

    /// Reads a preset from the host's binary layout.
    pub fn from_bytes(bytes: &[u8]) -> BinResult<Self> {
        let game_preset = FieldMarkerPreset::read_le(&mut Cursor::new(bytes))?;
        Ok(Self::from_game_preset(&game_preset))
    }

    /// Writes this preset in the host's binary layout, always `FieldMarkerPreset::SIZE` bytes.
    pub fn to_bytes(&self) -> BinResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(FieldMarkerPreset::SIZE));
        self.to_game_preset().write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn zone_id(&self) -> u16 {
        self.zone_id
    }

    /// Changes the zone id, and informs every listener synchronously if it actually changed.
    pub fn set_zone_id(&mut self, zone_id: u16) {
        if zone_id == self.zone_id {
            return;
        }

        self.zone_id = zone_id;

        let mut listeners = self.listeners.take();
        for listener in listeners.values_mut() {
            listener(self, zone_id);
        }
        self.listeners.restore(listeners);
    }

    /// Registers `listener` to be called with the new zone id whenever it changes.
    /// Listeners only get to look at the preset, so they can't trigger themselves again.
    pub fn on_zone_id_changed(
        &mut self,
        listener: impl FnMut(&WaymarkPreset, u16) + 'static,
    ) -> ListenerHandle {
        self.listeners.add(Box::new(listener))
    }

    /// Returns false if `handle` wasn't registered (anymore).
    pub fn remove_zone_id_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle)
    }

    pub fn zone_id_listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// All waymarks, in slot order.
    pub fn waymarks(&self) -> &[Waymark; WaymarkSlot::COUNT] {
        &self.waymarks
    }

    pub fn waymark(&self, slot: WaymarkSlot) -> &Waymark {
        &self.waymarks[slot.index()]
    }

    pub fn waymark_mut(&mut self, slot: WaymarkSlot) -> &mut Waymark {
        &mut self.waymarks[slot.index()]
    }

    /// Same as `waymark`, but by index. Fails for anything outside of 0 to 7.
    pub fn waymark_at(&self, index: i32) -> Result<&Waymark, PresetError> {
        let slot = WaymarkSlot::try_from(index)?;
        Ok(self.waymark(slot))
    }

    pub fn waymark_at_mut(&mut self, index: i32) -> Result<&mut Waymark, PresetError> {
        let slot = WaymarkSlot::try_from(index)?;
        Ok(self.waymark_mut(slot))
    }

    /// The display name for the waymark at `index`, see `WaymarkSlot::name`.
    pub fn slot_name(index: i32, long_form: bool) -> Result<&'static str, PresetError> {
        Ok(WaymarkSlot::try_from(index)?.name(long_form))
    }

    /// Iterates over each slot with its waymark, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (WaymarkSlot, &Waymark)> {
        WaymarkSlot::ALL.into_iter().zip(self.waymarks.iter())
    }
}
