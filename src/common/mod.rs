#[cfg(test)]
use binrw::BinWrite;
use chrono::{DateTime, Utc};

mod position;
pub use position::Position;

mod parsing;
pub use parsing::{FIXED_POINT_SCALE, coerce_zone_id};
pub(crate) use parsing::*;

/// Converts seconds since UNIX epoch into a point in time. Never fails, the whole `i32` range is representable.
pub fn time_from_timestamp(secs: i32) -> DateTime<Utc> {
    DateTime::from_timestamp(secs.into(), 0).unwrap_or_default()
}

/// Converts a point in time into seconds since UNIX epoch, dropping sub-second precision.
/// Times outside of what an `i32` can hold are saturated.
pub fn timestamp_from_time(time: &DateTime<Utc>) -> i32 {
    let secs = time.timestamp();
    i32::try_from(secs).unwrap_or(if secs < 0 { i32::MIN } else { i32::MAX })
}

/// Current time, truncated to whole seconds.
pub fn now_secs() -> DateTime<Utc> {
    time_from_timestamp(timestamp_from_time(&Utc::now()))
}

/// Helper to ensure that type `T` is written to `EXPECTED_SIZE`.
#[cfg(test)]
pub fn ensure_size<T: BinWrite + Default, const EXPECTED_SIZE: usize>()
where
    for<'a> T: BinWrite<Args<'a> = ()> + 'a + Default,
{
    use std::io::Cursor;

    let mut cursor = Cursor::new(Vec::new());
    let instance = T::default();
    instance.write_le(&mut cursor).expect("Failed to write!");

    assert_eq!(cursor.position() as usize, EXPECTED_SIZE);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps() {
        let time = time_from_timestamp(1_600_000_000);
        assert_eq!(time, Utc.with_ymd_and_hms(2020, 9, 13, 12, 26, 40).unwrap());
        assert_eq!(timestamp_from_time(&time), 1_600_000_000);

        assert_eq!(time_from_timestamp(-1).timestamp(), -1);
    }

    #[test]
    fn timestamps_saturate() {
        let far_future = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp_from_time(&far_future), i32::MAX);

        let far_past = Utc.with_ymd_and_hms(1800, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp_from_time(&far_past), i32::MIN);
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(now_secs().timestamp_subsec_nanos(), 0);
    }

    // Helper macros so we don't repeat ourselves in tests a bunch of times
    #[macro_export]
    macro_rules! host_record_tests_dir {
        ($rel_path:literal) => {
            concat!("resources/data/tests/", $rel_path)
        };
    }
}
