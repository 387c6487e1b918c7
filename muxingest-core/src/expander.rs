use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono_tz::Tz;
use muxingest_contracts::ChannelMapper;
use muxingest_model::{IngestCandidate, RecordingWindowRequest};
use tracing::{debug, trace};

use crate::error::{IngestError, Result};
use crate::identity::hour_start;

/// Expands recording window requests into whole-hour ingest candidates.
///
/// Every hour touched by an active window becomes one candidate, so the
/// downloaded files may cover slightly more than was requested:
///
/// - request `dr1` 14:30-15:30
/// - candidates `dr1` 14:00-15:00 and 15:00-16:00
///
/// Candidates are collected in an ordered set, which both coalesces
/// overlapping requests and fixes the output order.
#[derive(Debug, Clone)]
pub struct IntervalExpander<M> {
    mapper: M,
    timezone: Tz,
}

impl<M: ChannelMapper> IntervalExpander<M> {
    pub fn new(mapper: M, timezone: Tz) -> Self {
        Self { mapper, timezone }
    }

    /// All candidates for the days `from..=to`, deduplicated and sorted.
    pub fn expand(
        &self,
        requests: &[RecordingWindowRequest],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<IngestCandidate>> {
        debug!(
            requests = requests.len(),
            %from,
            %to,
            "expanding recording windows"
        );

        for request in requests {
            ensure_same_day_window(request)?;
        }

        let mut candidates = BTreeSet::new();
        for day in from.iter_days().take_while(|day| *day <= to) {
            for request in requests {
                candidates.extend(self.expand_day(request, day)?);
            }
        }

        debug!(candidates = candidates.len(), "expansion finished");
        Ok(candidates.into_iter().collect())
    }

    /// Candidates a single request contributes on `day`; empty when the
    /// request is not active that day.
    pub fn expand_day(
        &self,
        request: &RecordingWindowRequest,
        day: NaiveDate,
    ) -> Result<Vec<IngestCandidate>> {
        ensure_same_day_window(request)?;
        if !request.is_active_on(day) {
            return Ok(Vec::new());
        }

        let hours = request.hour_span();
        trace!(
            request_id = %request.id,
            channel = %request.source_channel_id,
            %day,
            from_hour = hours.start,
            to_hour = hours.end,
            "request active"
        );

        let mut candidates = Vec::with_capacity(hours.len());
        for hour in hours {
            let start = hour_start(day, hour);
            let mapping_date = start.date();
            // The mapping can change between days, so resolve per hour.
            let mapped = self
                .mapper
                .resolve(&request.source_channel_id, mapping_date)
                .map_err(|source| IngestError::MappingResolution {
                    channel: request.source_channel_id.clone(),
                    date: mapping_date,
                    source,
                })?;
            candidates.push(IngestCandidate::for_hour(
                request.source_channel_id.as_str(),
                mapped,
                start,
                self.timezone,
            ));
        }
        Ok(candidates)
    }
}

fn ensure_same_day_window(request: &RecordingWindowRequest) -> Result<()> {
    if request.crosses_midnight() {
        return Err(IngestError::WindowCrossesMidnight {
            request_id: request.id,
            from_time: request.from_time,
            to_time: request.to_time,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryChannelMapper;
    use chrono::NaiveTime;
    use chrono_tz::Europe::Copenhagen;
    use muxingest_model::{ChannelMapping, WeekdayCoverage};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn expander() -> IntervalExpander<InMemoryChannelMapper> {
        let mapper = InMemoryChannelMapper::new(vec![ChannelMapping::new(
            "dr1",
            "DR1",
            date(1970, 1, 1),
            date(2099, 12, 31),
        )]);
        IntervalExpander::new(mapper, Copenhagen)
    }

    #[test]
    fn first_candidate_of_monday_request_has_expected_file_name() {
        let day = date(2010, 3, 1);
        let request = RecordingWindowRequest::new(
            1,
            "dr1",
            WeekdayCoverage::Monday,
            (time(0, 0), time(1, 0)),
            (date(2010, 2, 26), date(2010, 3, 4)),
        );

        let candidates = expander().expand_day(&request, day).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].file_name(),
            "DR1_20100301000000_20100301010000.mux"
        );
    }

    #[test]
    fn inactive_day_yields_nothing_and_skips_mapping() {
        // No mapping for this channel at all; an inactive day must not ask.
        let request = RecordingWindowRequest::new(
            2,
            "unmapped",
            WeekdayCoverage::Sunday,
            (time(8, 0), time(9, 0)),
            (date(2010, 1, 1), date(2010, 12, 31)),
        );
        let candidates = expander().expand_day(&request, date(2010, 3, 1)).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn midnight_crossing_window_fails_before_any_lookup() {
        let request = RecordingWindowRequest::new(
            3,
            "unmapped",
            WeekdayCoverage::EveryDay,
            (time(23, 0), time(1, 0)),
            (date(2010, 1, 1), date(2010, 12, 31)),
        );
        let err = expander()
            .expand(&[request], date(2010, 3, 1), date(2010, 3, 7))
            .unwrap_err();
        assert!(matches!(err, IngestError::WindowCrossesMidnight { .. }));
    }

    #[test]
    fn reversed_range_is_empty() {
        let request = RecordingWindowRequest::new(
            4,
            "dr1",
            WeekdayCoverage::EveryDay,
            (time(8, 0), time(9, 0)),
            (date(2010, 1, 1), date(2010, 12, 31)),
        );
        let candidates = expander()
            .expand(&[request], date(2010, 3, 7), date(2010, 3, 1))
            .unwrap();
        assert!(candidates.is_empty());
    }
}
