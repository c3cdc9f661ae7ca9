use serde::{Deserialize, Serialize};

use crate::common::Position;
use crate::preset::PresetError;

/// One of the eight fixed waymark roles. The discriminant is the slot index, which is also the
/// order everything is iterated and serialized in.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaymarkSlot {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    One = 4,
    Two = 5,
    Three = 6,
    Four = 7,
}

impl WaymarkSlot {
    pub const COUNT: usize = 8;

    /// Every slot, in canonical order.
    pub const ALL: [WaymarkSlot; Self::COUNT] = [
        WaymarkSlot::A,
        WaymarkSlot::B,
        WaymarkSlot::C,
        WaymarkSlot::D,
        WaymarkSlot::One,
        WaymarkSlot::Two,
        WaymarkSlot::Three,
        WaymarkSlot::Four,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The display name of this slot. Number slots are abbreviated to their digit unless `long_form` is set.
    pub const fn name(self, long_form: bool) -> &'static str {
        match self {
            WaymarkSlot::A => "A",
            WaymarkSlot::B => "B",
            WaymarkSlot::C => "C",
            WaymarkSlot::D => "D",
            WaymarkSlot::One => {
                if long_form {
                    "One"
                } else {
                    "1"
                }
            }
            WaymarkSlot::Two => {
                if long_form {
                    "Two"
                } else {
                    "2"
                }
            }
            WaymarkSlot::Three => {
                if long_form {
                    "Three"
                } else {
                    "3"
                }
            }
            WaymarkSlot::Four => {
                if long_form {
                    "Four"
                } else {
                    "4"
                }
            }
        }
    }
}

impl TryFrom<i32> for WaymarkSlot {
    type Error = PresetError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(PresetError::IndexOutOfRange(value))
    }
}

impl std::fmt::Display for WaymarkSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name(false))
    }
}

/// A single placeable waymark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Waymark {
    id: u8,
    pub position: Position,
    /// Whether this waymark is placed at all.
    pub active: bool,
}

impl Waymark {
    pub(crate) fn new(id: u8) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Index of the slot this waymark belongs to.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Single line description of this waymark, e.g. `Active,  100.00,    0.00,   95.50`.
    pub fn render_data_string(&self) -> String {
        let state = if self.active { "Active" } else { "Inactive" };
        format!(
            "{state}, {:>7.2}, {:>7.2}, {:>7.2}",
            self.position.x, self.position.y, self.position.z
        )
    }
}
