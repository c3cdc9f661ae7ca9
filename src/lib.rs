//! Waymark presets for a certain MMO: the eight placeable field markers of a zone, and
//! conversion from and to the layout the game client stores them in.

/// Common functions, structures used in parsing and also useful elsewhere.
pub mod common;

/// Config management.
pub mod config;

/// Structures shared with the game client.
pub mod ipc;

/// The preset itself.
pub mod preset;

/// A single waymark, and the slots they go in.
pub mod waymark;

pub use preset::{PresetError, WaymarkPreset};
pub use waymark::{Waymark, WaymarkSlot};
