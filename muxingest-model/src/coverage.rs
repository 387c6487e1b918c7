use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::error::ModelError;

/// Days of the week a recording window request is active on.
///
/// This is a closed set: the archive only ever schedules these patterns, so
/// anything else coming out of a store is rejected while parsing instead of
/// being treated as "never active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum WeekdayCoverage {
    EveryDay,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    MondayThroughThursday,
    MondayThroughFriday,
    SaturdayAndSunday,
}

impl WeekdayCoverage {
    pub const ALL: [WeekdayCoverage; 11] = [
        WeekdayCoverage::EveryDay,
        WeekdayCoverage::Monday,
        WeekdayCoverage::Tuesday,
        WeekdayCoverage::Wednesday,
        WeekdayCoverage::Thursday,
        WeekdayCoverage::Friday,
        WeekdayCoverage::Saturday,
        WeekdayCoverage::Sunday,
        WeekdayCoverage::MondayThroughThursday,
        WeekdayCoverage::MondayThroughFriday,
        WeekdayCoverage::SaturdayAndSunday,
    ];

    /// Whether a day falling on `weekday` is covered.
    pub fn covers(&self, weekday: Weekday) -> bool {
        use Weekday::*;

        match self {
            WeekdayCoverage::EveryDay => true,
            WeekdayCoverage::Monday => weekday == Mon,
            WeekdayCoverage::Tuesday => weekday == Tue,
            WeekdayCoverage::Wednesday => weekday == Wed,
            WeekdayCoverage::Thursday => weekday == Thu,
            WeekdayCoverage::Friday => weekday == Fri,
            WeekdayCoverage::Saturday => weekday == Sat,
            WeekdayCoverage::Sunday => weekday == Sun,
            WeekdayCoverage::MondayThroughThursday => {
                matches!(weekday, Mon | Tue | Wed | Thu)
            }
            WeekdayCoverage::MondayThroughFriday => {
                matches!(weekday, Mon | Tue | Wed | Thu | Fri)
            }
            WeekdayCoverage::SaturdayAndSunday => matches!(weekday, Sat | Sun),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayCoverage::EveryDay => "EVERY_DAY",
            WeekdayCoverage::Monday => "MONDAY",
            WeekdayCoverage::Tuesday => "TUESDAY",
            WeekdayCoverage::Wednesday => "WEDNESDAY",
            WeekdayCoverage::Thursday => "THURSDAY",
            WeekdayCoverage::Friday => "FRIDAY",
            WeekdayCoverage::Saturday => "SATURDAY",
            WeekdayCoverage::Sunday => "SUNDAY",
            WeekdayCoverage::MondayThroughThursday => {
                "MONDAY_THROUGH_THURSDAY"
            }
            WeekdayCoverage::MondayThroughFriday => "MONDAY_THROUGH_FRIDAY",
            WeekdayCoverage::SaturdayAndSunday => "SATURDAY_AND_SUNDAY",
        }
    }
}

impl fmt::Display for WeekdayCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekdayCoverage {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized =
            raw.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        let coverage = match normalized.as_str() {
            "EVERY_DAY" | "DAILY" => WeekdayCoverage::EveryDay,
            "MONDAY" => WeekdayCoverage::Monday,
            "TUESDAY" => WeekdayCoverage::Tuesday,
            "WEDNESDAY" => WeekdayCoverage::Wednesday,
            "THURSDAY" => WeekdayCoverage::Thursday,
            "FRIDAY" => WeekdayCoverage::Friday,
            "SATURDAY" => WeekdayCoverage::Saturday,
            "SUNDAY" => WeekdayCoverage::Sunday,
            "MONDAY_THROUGH_THURSDAY" | "MONDAY_TO_THURSDAY" => {
                WeekdayCoverage::MondayThroughThursday
            }
            "MONDAY_THROUGH_FRIDAY" | "MONDAY_TO_FRIDAY" => {
                WeekdayCoverage::MondayThroughFriday
            }
            "SATURDAY_AND_SUNDAY" => WeekdayCoverage::SaturdayAndSunday,
            _ => {
                return Err(ModelError::UnknownWeekdayCoverage(raw.to_string()));
            }
        };
        Ok(coverage)
    }
}

impl TryFrom<String> for WeekdayCoverage {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekdayCoverage> for String {
    fn from(value: WeekdayCoverage) -> Self {
        value.as_str().to_string()
    }
}
