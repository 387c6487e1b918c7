use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub use muxingest_model::candidate::{
    archive_file_id, mux_file_name, resolve_wall_clock,
};

/// Wall-clock start of hour `hour` on `day`. No time zone is consulted, so a
/// day always has 24 hour starts.
pub fn hour_start(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour))
}
