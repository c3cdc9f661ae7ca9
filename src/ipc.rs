//! Structures shared with the host, laid out exactly as it reads and writes them.

mod field_marker_preset;
pub use field_marker_preset::{ActiveMarkers, FieldMarkerPreset, GamePosition};
