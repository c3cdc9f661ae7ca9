//! Specialized, but overall generic functions for mapping values to bytes should go here.

use crate::common::Position;

/// How many host units make up one environment unit.
pub const FIXED_POINT_SCALE: f32 = 1000.0;

/// Converts a fixed-point-by-1000 host coordinate into environment units.
pub(crate) fn read_fixed_point(value: i32) -> f32 {
    value as f32 / FIXED_POINT_SCALE
}

/// Converts a coordinate into fixed-point-by-1000 host units, truncating toward zero.
///
/// Multiplying in binary floating point turns e.g. 1.234 into 1233.99997, so instead the
/// decimal point of the shortest decimal form of `value` is shifted by three places.
/// Anything past the third fractional digit is discarded, and out of range values saturate.
///
/// Reading a host value and writing it back gives the same value for anything within
/// ±16,384,000. Past that an `f32` can no longer tell neighbouring thousandths apart.
pub(crate) fn write_fixed_point(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }

    // Display never uses exponent notation for floats, and prints "inf" for infinities.
    let text = value.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let thousandths = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));

    let magnitude = whole
        .parse::<i64>()
        .ok()
        .and_then(|whole| whole.checked_mul(1000))
        .and_then(|scaled| scaled.checked_add(thousandths))
        .unwrap_or(i64::MAX);

    let scaled = if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    };

    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub(crate) fn read_fixed_point_position(packed: [i32; 3]) -> Position {
    Position {
        x: read_fixed_point(packed[0]),
        y: read_fixed_point(packed[1]),
        z: read_fixed_point(packed[2]),
    }
}

pub(crate) fn write_fixed_point_position(pos: &Position) -> [i32; 3] {
    [
        write_fixed_point(pos.x),
        write_fixed_point(pos.y),
        write_fixed_point(pos.z),
    ]
}

/// Zone ids outside of the u16 range are replaced with 0 instead of failing.
pub fn coerce_zone_id(value: i64) -> u16 {
    match u16::try_from(value) {
        Ok(zone_id) => zone_id,
        Err(_) => {
            tracing::warn!("Zone id {value} does not fit in 16 bits, using 0 instead!");
            0
        }
    }
}

pub(crate) fn read_zone_id(value: u16) -> i32 {
    value.into()
}

pub(crate) fn write_zone_id(value: &i32) -> u16 {
    coerce_zone_id((*value).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_reads() {
        assert_eq!(read_fixed_point(1000), 1.0);
        assert_eq!(read_fixed_point(-5000), -5.0);
        assert_eq!(read_fixed_point(1), 0.001);
        assert_eq!(read_fixed_point(0), 0.0);
    }

    #[test]
    fn fixed_point_truncates() {
        assert_eq!(write_fixed_point(1.2349), 1234);
        assert_eq!(write_fixed_point(-1.0001), -1000);
        assert_eq!(write_fixed_point(0.0009), 0);
        assert_eq!(write_fixed_point(-0.0009), 0);
    }

    #[test]
    fn fixed_point_saturates() {
        assert_eq!(write_fixed_point(f32::MAX), i32::MAX);
        assert_eq!(write_fixed_point(f32::MIN), i32::MIN);
        assert_eq!(write_fixed_point(f32::INFINITY), i32::MAX);
        assert_eq!(write_fixed_point(f32::NEG_INFINITY), i32::MIN);
        assert_eq!(write_fixed_point(f32::NAN), 0);
        assert_eq!(write_fixed_point(3_000_000.0), i32::MAX);
    }

    #[test]
    fn fixed_point_survives_a_trip() {
        // 1.234 is slightly below 1.234 as a float, and must not come back as 1233.
        for value in [
            1234, -1234, 251, -251, 98765, -98765, 1_000_000, -2_000_000, 2_097_151, 1, -1, 999,
        ] {
            assert_eq!(write_fixed_point(read_fixed_point(value)), value);
        }
    }

    #[test]
    fn fixed_point_trip_limit() {
        for value in [16_383_999, 16_384_000, -16_383_999, -16_384_000] {
            assert_eq!(write_fixed_point(read_fixed_point(value)), value);
        }

        assert_eq!(write_fixed_point(read_fixed_point(16_384_001)), 16_384_002);
        assert_eq!(write_fixed_point(read_fixed_point(-16_384_001)), -16_384_002);
    }

    #[test]
    fn fixed_point_tiny_values() {
        assert_eq!(write_fixed_point(0.0000001), 0);
        assert_eq!(write_fixed_point(-0.0), 0);
        assert_eq!(write_fixed_point(12.5), 12500);
    }

    #[test]
    fn positions() {
        let position = read_fixed_point_position([1500, -250, 3]);
        assert_eq!(position, Position::new(1.5, -0.25, 0.003));
        assert_eq!(write_fixed_point_position(&position), [1500, -250, 3]);
    }

    #[test]
    fn zone_id_coercion() {
        assert_eq!(coerce_zone_id(-5), 0);
        assert_eq!(coerce_zone_id(70000), 0);
        assert_eq!(coerce_zone_id(65535), 65535);
        assert_eq!(coerce_zone_id(65536), 0);
        assert_eq!(coerce_zone_id(777), 777);
    }

    #[test]
    fn zone_id_wire_mapping() {
        assert_eq!(read_zone_id(65535), 65535);
        assert_eq!(write_zone_id(&65535), 65535);
        assert_eq!(write_zone_id(&-1), 0);
    }
}
