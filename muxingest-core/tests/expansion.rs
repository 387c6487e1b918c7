use chrono::{NaiveDate, NaiveTime, TimeDelta, Timelike};
use chrono_tz::Europe::Copenhagen;
use muxingest_core::{
    IngestError, IntervalExpander, memory::InMemoryChannelMapper,
};
use muxingest_model::{ChannelMapping, RecordingWindowRequest, WeekdayCoverage};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn dr1_expander() -> IntervalExpander<InMemoryChannelMapper> {
    IntervalExpander::new(
        InMemoryChannelMapper::default().with_static("dr1", "DR1"),
        Copenhagen,
    )
}

fn open_ended(
    id: i64,
    coverage: WeekdayCoverage,
    window: (NaiveTime, NaiveTime),
) -> RecordingWindowRequest {
    RecordingWindowRequest::new(
        id,
        "dr1",
        coverage,
        window,
        (date(1970, 1, 1), date(2099, 12, 31)),
    )
}

// 2010-03-01 is a Monday, 2010-03-07 a Sunday.

#[test]
fn monday_request_over_one_week_yields_twelve_files() {
    let requests =
        [open_ended(1, WeekdayCoverage::Monday, (time(8, 0), time(20, 0)))];
    let to = date(2010, 3, 7);
    let from = to - TimeDelta::days(7);

    let candidates = dr1_expander().expand(&requests, from, to).unwrap();

    assert_eq!(candidates.len(), 12);
    assert_eq!(
        candidates.first().unwrap().file_name(),
        "DR1_20100301080000_20100301090000.mux"
    );
    assert_eq!(
        candidates.last().unwrap().file_name(),
        "DR1_20100301190000_20100301200000.mux"
    );
}

#[test]
fn monday_request_over_two_weeks_yields_two_days_of_files() {
    let requests =
        [open_ended(1, WeekdayCoverage::Monday, (time(8, 0), time(20, 0)))];
    let to = date(2010, 3, 14);
    let from = to - TimeDelta::days(14);

    let candidates = dr1_expander().expand(&requests, from, to).unwrap();
    assert_eq!(candidates.len(), 2 * 12);
}

#[test]
fn monday_through_thursday_covers_four_days() {
    let requests = [open_ended(
        1,
        WeekdayCoverage::MondayThroughThursday,
        (time(8, 0), time(20, 0)),
    )];
    let to = date(2010, 3, 7);
    let from = to - TimeDelta::days(7);

    let candidates = dr1_expander().expand(&requests, from, to).unwrap();
    assert_eq!(candidates.len(), 4 * 12);
}

#[test]
fn daily_request_with_partial_last_hour_covers_whole_days() {
    let requests =
        [open_ended(1, WeekdayCoverage::EveryDay, (time(0, 0), time(23, 59)))];

    let candidates = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 7))
        .unwrap();

    assert_eq!(candidates.len(), 7 * 24);
    assert_eq!(
        candidates.last().unwrap().file_name(),
        "DR1_20100307230000_20100308000000.mux"
    );
}

#[test]
fn overlapping_requests_are_coalesced() {
    let requests = [
        open_ended(1, WeekdayCoverage::EveryDay, (time(0, 0), time(23, 59))),
        open_ended(1, WeekdayCoverage::Thursday, (time(0, 0), time(23, 59))),
    ];

    let candidates = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 7))
        .unwrap();
    assert_eq!(candidates.len(), 7 * 24);
}

#[test]
fn partially_overlapping_requests_yield_the_union_of_hours() {
    let requests = [
        open_ended(1, WeekdayCoverage::EveryDay, (time(8, 0), time(12, 0))),
        open_ended(2, WeekdayCoverage::EveryDay, (time(10, 0), time(14, 0))),
    ];

    let candidates = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 1))
        .unwrap();

    let hours: Vec<u32> =
        candidates.iter().map(|c| c.start_time().hour()).collect();
    assert_eq!(hours, (8..=13).collect::<Vec<_>>());
}

#[test]
fn window_ending_on_the_hour_excludes_that_hour() {
    let requests =
        [open_ended(1, WeekdayCoverage::EveryDay, (time(14, 0), time(16, 0)))];
    let candidates = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 1))
        .unwrap();

    let hours: Vec<u32> =
        candidates.iter().map(|c| c.start_time().hour()).collect();
    assert_eq!(hours, vec![14, 15]);
}

#[test]
fn partial_hours_round_outwards() {
    let requests = [open_ended(
        1,
        WeekdayCoverage::EveryDay,
        (time(14, 30), time(15, 30)),
    )];
    let candidates = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 1))
        .unwrap();

    let names: Vec<&str> = candidates.iter().map(|c| c.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "DR1_20100301140000_20100301150000.mux",
            "DR1_20100301150000_20100301160000.mux",
        ]
    );
}

#[test]
fn validity_bounds_are_inclusive() {
    let request = RecordingWindowRequest::new(
        1,
        "dr1",
        WeekdayCoverage::EveryDay,
        (time(8, 0), time(9, 0)),
        (date(2010, 3, 2), date(2010, 3, 4)),
    );
    let candidates = dr1_expander()
        .expand(&[request], date(2010, 3, 1), date(2010, 3, 7))
        .unwrap();

    let days: Vec<NaiveDate> = candidates
        .iter()
        .map(|c| c.start_time().date())
        .collect();
    assert_eq!(days, vec![date(2010, 3, 2), date(2010, 3, 3), date(2010, 3, 4)]);
}

#[test]
fn output_is_sorted_and_independent_of_request_order() {
    let tv2 = RecordingWindowRequest::new(
        2,
        "tv2",
        WeekdayCoverage::MondayThroughFriday,
        (time(18, 0), time(22, 15)),
        (date(1970, 1, 1), date(2099, 12, 31)),
    );
    let dr1 =
        open_ended(1, WeekdayCoverage::SaturdayAndSunday, (time(6, 0), time(9, 0)));
    let expander = IntervalExpander::new(
        InMemoryChannelMapper::default()
            .with_static("dr1", "DR1")
            .with_static("tv2", "TV2"),
        Copenhagen,
    );

    let forward = expander
        .expand(&[dr1.clone(), tv2.clone()], date(2010, 3, 1), date(2010, 3, 7))
        .unwrap();
    let backward = expander
        .expand(&[tv2, dr1], date(2010, 3, 1), date(2010, 3, 7))
        .unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 5 * 5 + 2 * 3);
    assert!(forward.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn mapping_is_resolved_for_each_day() {
    let mapper = InMemoryChannelMapper::new(vec![
        ChannelMapping::new("dr1", "DR1", date(2000, 1, 1), date(2010, 3, 3)),
        ChannelMapping::new("dr1", "DR1 HD", date(2010, 3, 4), date(2099, 12, 31)),
    ]);
    let expander = IntervalExpander::new(mapper, Copenhagen);
    let requests =
        [open_ended(1, WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0)))];

    let candidates = expander
        .expand(&requests, date(2010, 3, 3), date(2010, 3, 4))
        .unwrap();

    let mapped: Vec<&str> =
        candidates.iter().map(|c| c.mapped_channel_id()).collect();
    assert_eq!(mapped, vec!["DR1", "DR1 HD"]);
    assert_eq!(candidates[1].source_channel_id(), "dr1");
}

#[test]
fn missing_mapping_aborts_expansion() {
    let request = RecordingWindowRequest::new(
        7,
        "kanal5",
        WeekdayCoverage::EveryDay,
        (time(8, 0), time(9, 0)),
        (date(1970, 1, 1), date(2099, 12, 31)),
    );
    let err = dr1_expander()
        .expand(&[request], date(2010, 3, 1), date(2010, 3, 7))
        .unwrap_err();

    match err {
        IngestError::MappingResolution { channel, date: day, .. } => {
            assert_eq!(channel, "kanal5");
            assert_eq!(day, date(2010, 3, 1));
        }
        other => panic!("expected a mapping failure, got {other:?}"),
    }
}

#[test]
fn midnight_crossing_window_is_rejected() {
    let requests = [
        open_ended(1, WeekdayCoverage::EveryDay, (time(8, 0), time(9, 0))),
        open_ended(2, WeekdayCoverage::Sunday, (time(22, 0), time(2, 0))),
    ];
    let err = dr1_expander()
        .expand(&requests, date(2010, 3, 1), date(2010, 3, 7))
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::WindowCrossesMidnight { request_id, .. } if request_id.get() == 2
    ));
}

#[test]
fn daylight_saving_weeks_keep_every_hour() {
    let requests =
        [open_ended(1, WeekdayCoverage::EveryDay, (time(0, 0), time(23, 59)))];

    // Copenhagen springs forward on 2012-03-25 and falls back on 2012-10-28.
    for (from, to) in [
        (date(2012, 3, 19), date(2012, 3, 25)),
        (date(2012, 10, 22), date(2012, 10, 28)),
    ] {
        let candidates = dr1_expander().expand(&requests, from, to).unwrap();
        assert_eq!(candidates.len(), 24 * 7, "week {from}..={to}");
        assert!(
            candidates
                .iter()
                .all(|c| c.end_time() - c.start_time() == TimeDelta::hours(1))
        );
    }
}

#[test]
fn daylight_saving_days_name_every_wall_clock_hour() {
    let requests =
        [open_ended(1, WeekdayCoverage::EveryDay, (time(1, 0), time(4, 0)))];

    let spring = dr1_expander()
        .expand(&requests, date(2012, 3, 25), date(2012, 3, 25))
        .unwrap();
    let names: Vec<&str> = spring.iter().map(|c| c.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "DR1_20120325010000_20120325020000.mux",
            "DR1_20120325020000_20120325030000.mux",
            "DR1_20120325030000_20120325040000.mux",
        ]
    );

    let autumn = dr1_expander()
        .expand(&requests, date(2012, 10, 28), date(2012, 10, 28))
        .unwrap();
    assert_eq!(autumn[1].file_name(), "DR1_20121028020000_20121028030000.mux");
}
