use binrw::binrw;
use bitflags::bitflags;

use crate::common::{read_zone_id, write_zone_id};

/// A coordinate triplet as the host stores it, in fixed-point-by-1000 units.
#[binrw]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GamePosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GamePosition {
    pub const SIZE: usize = 0xC;

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Which of the eight waymarks are placed, bit 0 is A and bit 7 is Four.
#[binrw]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveMarkers(pub u8);

impl std::fmt::Debug for ActiveMarkers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    impl ActiveMarkers : u8 {
        const A = 0x01;
        const B = 0x02;
        const C = 0x04;
        const D = 0x08;
        const ONE = 0x10;
        const TWO = 0x20;
        const THREE = 0x40;
        const FOUR = 0x80;
    }
}

impl ActiveMarkers {
    /// The flag for the waymark in slot `index` (0 to 7).
    pub fn for_index(index: usize) -> Self {
        debug_assert!(index < 8);
        Self::from_bits_retain(1 << index)
    }
}

/// The waymark preset as stored by the host, see FMARKER.DAT.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldMarkerPreset {
    /// In slot order: A, B, C, D, One, Two, Three, Four.
    pub markers: [GamePosition; 8],
    #[brw(pad_after = 1)] // reserved
    pub active_markers: ActiveMarkers,
    /// Index into the ContentFinderCondition Excel sheet. This is a `u16` on the wire,
    /// but importers may hand us anything, see `coerce_zone_id`.
    #[br(map = read_zone_id)]
    #[bw(map = write_zone_id)]
    pub content_finder_condition_id: i32,
    /// Seconds since UNIX epoch.
    pub timestamp: i32,
}

impl FieldMarkerPreset {
    pub const SIZE: usize = 0x68;
}

#[cfg(test)]
mod tests {
    use std::{fs::read, io::Cursor, path::PathBuf};

    use binrw::{BinRead, BinWrite};

    use crate::common::ensure_size;
    use crate::host_record_tests_dir;

    use super::*;

    #[test]
    fn read_field_marker_preset() {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(host_record_tests_dir!("field_marker_preset.bin"));

        let buffer = read(d).unwrap();
        let mut buffer = Cursor::new(&buffer);

        let preset = FieldMarkerPreset::read_le(&mut buffer).unwrap();
        assert_eq!(preset.markers[0], GamePosition::new(100000, 0, 95500));
        assert_eq!(preset.markers[1], GamePosition::new(114500, 0, 100000));
        assert_eq!(preset.markers[2], GamePosition::new(100000, 0, 114500));
        assert_eq!(preset.markers[3], GamePosition::new(85500, 0, 100000));
        assert_eq!(preset.markers[4], GamePosition::new(89750, -250, 89750));
        assert_eq!(preset.markers[5], GamePosition::new(0, 0, 0));
        assert_eq!(preset.markers[6], GamePosition::new(110250, -250, 110250));
        assert_eq!(preset.markers[7], GamePosition::new(0, 0, 0));
        assert_eq!(
            preset.active_markers,
            ActiveMarkers::A
                | ActiveMarkers::B
                | ActiveMarkers::C
                | ActiveMarkers::D
                | ActiveMarkers::ONE
                | ActiveMarkers::THREE
        );
        assert_eq!(preset.content_finder_condition_id, 1010);
        assert_eq!(preset.timestamp, 1_700_000_000);
        assert_eq!(buffer.position() as usize, FieldMarkerPreset::SIZE);
    }

    #[test]
    fn write_field_marker_preset() {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(host_record_tests_dir!("field_marker_preset.bin"));

        let original = read(d).unwrap();
        let preset = FieldMarkerPreset::read_le(&mut Cursor::new(&original)).unwrap();

        let mut cursor = Cursor::new(Vec::new());
        preset.write_le(&mut cursor).unwrap();
        assert_eq!(cursor.into_inner(), original);
    }

    #[test]
    fn out_of_range_zone_is_written_as_zero() {
        let preset = FieldMarkerPreset {
            content_finder_condition_id: 70000,
            ..Default::default()
        };

        let mut cursor = Cursor::new(Vec::new());
        preset.write_le(&mut cursor).unwrap();
        let buffer = cursor.into_inner();
        assert_eq!(&buffer[0x62..0x64], &[0, 0]);
    }

    #[test]
    fn flag_layout() {
        assert_eq!(ActiveMarkers::for_index(0), ActiveMarkers::A);
        assert_eq!(ActiveMarkers::for_index(4), ActiveMarkers::ONE);
        assert_eq!(ActiveMarkers::for_index(7), ActiveMarkers::FOUR);
        assert_eq!(ActiveMarkers::all().bits(), 0xFF);
    }

    #[test]
    fn field_marker_preset_size() {
        ensure_size::<FieldMarkerPreset, { FieldMarkerPreset::SIZE }>();
    }

    #[test]
    fn game_position_size() {
        ensure_size::<GamePosition, { GamePosition::SIZE }>();
    }
}
