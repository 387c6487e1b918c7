use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::{ModelError, RequestId, WeekdayCoverage};

/// Recurring rule describing when a channel should be archived.
///
/// The daily window is wall-clock time in the archive's zone and never spans
/// midnight; the validity dates are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordingWindowRequest {
    pub id: RequestId,
    pub source_channel_id: String,
    pub weekday_coverage: WeekdayCoverage,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl RecordingWindowRequest {
    pub fn new(
        id: impl Into<RequestId>,
        source_channel_id: impl Into<String>,
        weekday_coverage: WeekdayCoverage,
        (from_time, to_time): (NaiveTime, NaiveTime),
        (from_date, to_date): (NaiveDate, NaiveDate),
    ) -> Self {
        Self {
            id: id.into(),
            source_channel_id: source_channel_id.into(),
            weekday_coverage,
            from_time,
            to_time,
            from_date,
            to_date,
        }
    }

    /// Rejects rows no store should hand out: a blank channel or a validity
    /// period that ends before it starts. Midnight-crossing windows are
    /// well-formed here; the expander decides whether it supports them.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.source_channel_id.trim().is_empty() {
            return Err(ModelError::InvalidRequest(format!(
                "request {} has no source channel",
                self.id
            )));
        }
        if self.from_date > self.to_date {
            return Err(ModelError::InvalidRequest(format!(
                "request {} is valid from {} to {}",
                self.id, self.from_date, self.to_date
            )));
        }
        Ok(())
    }

    /// Date-only validity check, inclusive on both ends.
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        self.from_date <= day && day <= self.to_date
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.is_valid_on(day) && self.weekday_coverage.covers(day.weekday())
    }

    /// Whether the validity period intersects `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from_date <= to && from <= self.to_date
    }

    pub fn crosses_midnight(&self) -> bool {
        self.from_time > self.to_time
    }

    /// Whole hours `[from, to)` needed to cover the daily window. A partial
    /// final hour is rounded up, so the upper bound may be 24.
    pub fn hour_span(&self) -> std::ops::Range<u32> {
        let from_hour = self.from_time.hour();
        let mut to_hour = self.to_time.hour();
        if self.to_time.minute() != 0 {
            to_hour += 1;
        }
        from_hour..to_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(
        coverage: WeekdayCoverage,
        window: (NaiveTime, NaiveTime),
    ) -> RecordingWindowRequest {
        RecordingWindowRequest::new(
            1,
            "dr1",
            coverage,
            window,
            (date(2010, 2, 26), date(2010, 3, 4)),
        )
    }

    #[test]
    fn validity_bounds_are_inclusive() {
        let req = request(WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0)));
        assert!(!req.is_valid_on(date(2010, 2, 25)));
        assert!(req.is_valid_on(date(2010, 2, 26)));
        assert!(req.is_valid_on(date(2010, 3, 4)));
        assert!(!req.is_valid_on(date(2010, 3, 5)));
    }

    #[test]
    fn activity_needs_validity_and_weekday() {
        let req = request(WeekdayCoverage::Monday, (time(8, 0), time(9, 0)));
        // 2010-03-01 is a Monday
        assert!(req.is_active_on(date(2010, 3, 1)));
        assert!(!req.is_active_on(date(2010, 3, 2)));
        // Monday, but outside validity
        assert!(!req.is_active_on(date(2010, 3, 8)));
    }

    #[test]
    fn hour_span_rounds_partial_final_hour_up() {
        let partial =
            request(WeekdayCoverage::EveryDay, (time(14, 30), time(15, 30)));
        assert_eq!(partial.hour_span(), 14..16);

        let on_the_hour =
            request(WeekdayCoverage::EveryDay, (time(8, 0), time(20, 0)));
        assert_eq!(on_the_hour.hour_span(), 8..20);

        let whole_day =
            request(WeekdayCoverage::EveryDay, (time(0, 0), time(23, 59)));
        assert_eq!(whole_day.hour_span(), 0..24);
    }

    #[test]
    fn detects_windows_crossing_midnight() {
        let req = request(WeekdayCoverage::EveryDay, (time(22, 0), time(2, 0)));
        assert!(req.crosses_midnight());
        let same = request(WeekdayCoverage::EveryDay, (time(5, 0), time(5, 0)));
        assert!(!same.crosses_midnight());
        assert!(same.hour_span().is_empty());
    }

    #[test]
    fn validation_rejects_reversed_dates_and_blank_channel() {
        let mut req =
            request(WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0)));
        assert_eq!(req.validate(), Ok(()));

        req.to_date = date(2010, 2, 1);
        assert!(matches!(req.validate(), Err(ModelError::InvalidRequest(_))));

        let blank = RecordingWindowRequest {
            source_channel_id: " ".into(),
            ..request(WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0)))
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn overlap_with_window() {
        let req = request(WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0)));
        assert!(req.overlaps(date(2010, 3, 4), date(2010, 3, 10)));
        assert!(!req.overlaps(date(2010, 3, 5), date(2010, 3, 10)));
        assert!(req.overlaps(date(2010, 1, 1), date(2010, 2, 26)));
    }
}
