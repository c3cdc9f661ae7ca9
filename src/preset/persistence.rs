//! The structured document presets are saved as. Field names match presets saved by older
//! versions of the plugin, which is also why everything is optional on read.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::common::{Position, coerce_zone_id, now_secs};
use crate::config::Localization;
use crate::waymark::WaymarkSlot;

use super::WaymarkPreset;

/// Decides which optional fields end up in a saved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationPolicy {
    #[serde(default = "SerializationPolicy::default_include_time")]
    pub include_time: bool,
}

impl Default for SerializationPolicy {
    fn default() -> Self {
        Self {
            include_time: Self::default_include_time(),
        }
    }
}

impl SerializationPolicy {
    fn default_include_time() -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WaymarkDocument {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub active: bool,
    #[serde(rename = "ID")]
    pub id: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "MapID", default, deserialize_with = "deserialize_zone_id")]
    pub map_id: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three: Option<WaymarkDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four: Option<WaymarkDocument>,
}

impl PresetDocument {
    fn waymark(&self, slot: WaymarkSlot) -> Option<&WaymarkDocument> {
        match slot {
            WaymarkSlot::A => self.a.as_ref(),
            WaymarkSlot::B => self.b.as_ref(),
            WaymarkSlot::C => self.c.as_ref(),
            WaymarkSlot::D => self.d.as_ref(),
            WaymarkSlot::One => self.one.as_ref(),
            WaymarkSlot::Two => self.two.as_ref(),
            WaymarkSlot::Three => self.three.as_ref(),
            WaymarkSlot::Four => self.four.as_ref(),
        }
    }

    fn waymark_mut(&mut self, slot: WaymarkSlot) -> &mut Option<WaymarkDocument> {
        match slot {
            WaymarkSlot::A => &mut self.a,
            WaymarkSlot::B => &mut self.b,
            WaymarkSlot::C => &mut self.c,
            WaymarkSlot::D => &mut self.d,
            WaymarkSlot::One => &mut self.one,
            WaymarkSlot::Two => &mut self.two,
            WaymarkSlot::Three => &mut self.three,
            WaymarkSlot::Four => &mut self.four,
        }
    }
}

/// Older tools wrote zone ids that don't fit in a u16, those become 0 instead of failing
/// the whole document.
fn deserialize_zone_id<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    struct ZoneIdVisitor;

    impl Visitor<'_> for ZoneIdVisitor {
        type Value = u16;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a zone id")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u16, E> {
            Ok(coerce_zone_id(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u16, E> {
            Ok(coerce_zone_id(i64::try_from(value).unwrap_or(-1)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u16, E> {
            if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u16::MAX) {
                Ok(value as u16)
            } else {
                tracing::warn!("Zone id {value} is not a valid zone id, using 0 instead!");
                Ok(0)
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<u16, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u16, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(ZoneIdVisitor)
}

impl WaymarkPreset {
    /// Builds the document to save this preset as, leaving out fields as `policy` says.
    pub fn to_document(&self, policy: &SerializationPolicy) -> PresetDocument {
        let mut document = PresetDocument {
            name: Some(self.name.clone()),
            map_id: self.zone_id,
            time: policy.include_time.then_some(self.timestamp),
            ..Default::default()
        };

        for (slot, waymark) in self.iter() {
            *document.waymark_mut(slot) = Some(WaymarkDocument {
                x: waymark.position.x,
                y: waymark.position.y,
                z: waymark.position.z,
                active: waymark.active,
                id: waymark.id(),
            });
        }

        document
    }

    /// Restores a preset from a saved document. Anything missing is filled in with defaults,
    /// waymark ids always follow the slot they are stored in.
    pub fn from_document(document: &PresetDocument, localization: &Localization) -> Self {
        let mut preset = Self::new_localized(localization);

        if let Some(name) = &document.name {
            preset.name = name.clone();
        }
        preset.zone_id = document.map_id;
        preset.timestamp = document.time.unwrap_or_else(now_secs);

        for slot in WaymarkSlot::ALL {
            match document.waymark(slot) {
                Some(saved) => {
                    let waymark = preset.waymark_mut(slot);
                    waymark.position = Position::new(saved.x, saved.y, saved.z);
                    waymark.active = saved.active;
                }
                None => tracing::debug!("Waymark {slot} is missing from the saved preset"),
            }
        }

        preset
    }

    pub fn to_json(&self, policy: &SerializationPolicy) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_document(policy))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Self::from_json_localized(json, &Localization::default())
    }

    pub fn from_json_localized(
        json: &str,
        localization: &Localization,
    ) -> serde_json::Result<Self> {
        let document: PresetDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(&document, localization))
    }
}
