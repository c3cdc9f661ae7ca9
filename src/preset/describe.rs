use chrono::Local;

use crate::config::Localization;

use super::WaymarkPreset;

/// Looks up a human readable name for a zone. Implemented for any matching closure.
pub trait ZoneNameResolver {
    fn zone_name(
        &self,
        zone_id: u16,
        show_id: bool,
    ) -> Result<String, Box<dyn std::error::Error>>;
}

impl<F> ZoneNameResolver for F
where
    F: Fn(u16, bool) -> Result<String, Box<dyn std::error::Error>>,
{
    fn zone_name(
        &self,
        zone_id: u16,
        show_id: bool,
    ) -> Result<String, Box<dyn std::error::Error>> {
        self(zone_id, show_id)
    }
}

const LINE_ENDING: &str = "\r\n";
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl WaymarkPreset {
    /// Multi-line summary of this preset, meant for displaying or copying to the clipboard.
    /// See `describe_localized`.
    pub fn describe(&self, resolver: Option<&dyn ZoneNameResolver>, show_id: bool) -> String {
        self.describe_localized(resolver, show_id, &Localization::default())
    }

    /// Same as `describe`, but with labels from `localization`.
    ///
    /// Without a `resolver` the zone name is left empty. If the resolver fails, its error is
    /// logged and the localized error message is shown instead, this never fails.
    pub fn describe_localized(
        &self,
        resolver: Option<&dyn ZoneNameResolver>,
        show_id: bool,
        localization: &Localization,
    ) -> String {
        let zone_name = match resolver {
            Some(resolver) => match resolver.zone_name(self.zone_id, show_id) {
                Ok(zone_name) => zone_name,
                Err(err) => {
                    tracing::warn!("Failed to look up the name of zone {}: {err}", self.zone_id);
                    localization.zone_name_error.clone()
                }
            },
            None => String::new(),
        };

        let mut lines: Vec<String> = self
            .iter()
            .map(|(slot, waymark)| format!("{slot}: {}", waymark.render_data_string()))
            .collect();

        lines.push(format!("{}{zone_name}", localization.zone_label));
        lines.push(format!(
            "{}{}",
            localization.last_modified_label,
            self.timestamp
                .with_timezone(&Local)
                .format(LAST_MODIFIED_FORMAT)
        ));

        lines.join(LINE_ENDING)
    }
}
