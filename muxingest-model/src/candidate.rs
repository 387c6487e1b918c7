use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// `yyyyMMddHHmmss`, the wall-clock stamp used in file names and manifests.
pub const WALL_CLOCK_FORMAT: &str = "%Y%m%d%H%M%S";

const ARCHIVE_STAMP_FORMAT: &str = "%Y-%m-%d-%H.%M.%S";

/// One whole-hour file expected to exist in the external archive.
///
/// Start and end are wall-clock times on the archive's clock, so every day
/// has 24 hourly files whatever the daylight-saving rules say. The time zone
/// only comes into play when the archive identity needs epoch seconds.
///
/// Equality covers every field; ordering is by start time, then file name,
/// then channel ids, so sorted output is fully deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngestCandidate {
    source_channel_id: String,
    mapped_channel_id: String,
    file_name: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    timezone: Tz,
}

impl IngestCandidate {
    /// Builds the candidate covering the wall-clock hour starting at
    /// `start_time`.
    pub fn for_hour(
        source_channel_id: impl Into<String>,
        mapped_channel_id: impl Into<String>,
        start_time: NaiveDateTime,
        timezone: Tz,
    ) -> Self {
        let end_time = start_time + TimeDelta::hours(1);
        let mapped_channel_id = mapped_channel_id.into();
        let file_name = mux_file_name(&mapped_channel_id, start_time, end_time);
        Self {
            source_channel_id: source_channel_id.into(),
            mapped_channel_id,
            file_name,
            start_time,
            end_time,
            timezone,
        }
    }

    pub fn source_channel_id(&self) -> &str {
        &self.source_channel_id
    }

    pub fn mapped_channel_id(&self) -> &str {
        &self.mapped_channel_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Identity the workflow monitor tracks this file under.
    pub fn archive_file_id(&self) -> String {
        archive_file_id(
            &self.source_channel_id,
            self.start_time,
            self.end_time,
            self.timezone,
        )
    }
}

impl Ord for IngestCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_time
            .cmp(&other.start_time)
            .then_with(|| self.file_name.cmp(&other.file_name))
            .then_with(|| self.mapped_channel_id.cmp(&other.mapped_channel_id))
            .then_with(|| self.source_channel_id.cmp(&other.source_channel_id))
            .then_with(|| self.end_time.cmp(&other.end_time))
            .then_with(|| self.timezone.name().cmp(other.timezone.name()))
    }
}

impl PartialOrd for IngestCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Resolves a wall-clock time in `timezone` to an instant.
///
/// Ambiguous times (autumn fall-back) take the earlier instant. Times inside a
/// spring-forward gap are pushed forward by an hour.
pub fn resolve_wall_clock(timezone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    timezone
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            timezone
                .from_local_datetime(&(local + TimeDelta::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| timezone.from_utc_datetime(&local))
}

/// `<mapped>_<start>_<end>.mux` with wall-clock stamps.
pub fn mux_file_name(
    mapped_channel_id: &str,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}.mux",
        mapped_channel_id,
        start_time.format(WALL_CLOCK_FORMAT),
        end_time.format(WALL_CLOCK_FORMAT)
    )
}

/// Archive identity combining epoch seconds and wall-clock stamps, e.g.
/// `dr1_yousee.1326114000-2012-01-09-14.00.00_1326117600-2012-01-09-15.00.00_ftp.ts`.
///
/// The stamps are the wall-clock times as given; only the epoch seconds go
/// through [`resolve_wall_clock`].
pub fn archive_file_id(
    source_channel_id: &str,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    timezone: Tz,
) -> String {
    format!(
        "{}_yousee.{}-{}_{}-{}_ftp.ts",
        source_channel_id,
        resolve_wall_clock(timezone, start_time).timestamp(),
        start_time.format(ARCHIVE_STAMP_FORMAT),
        resolve_wall_clock(timezone, end_time).timestamp(),
        end_time.format(ARCHIVE_STAMP_FORMAT)
    )
}
