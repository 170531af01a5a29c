use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DayKind {
    Weekday,
    Weekend,
    SpecialDay,
}

impl DayKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Weekend => "weekend",
            Self::SpecialDay => "special_day",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayClassification {
    pub kind: DayKind,
    pub start_of_month: bool,
}

/// A fixed calendar day that recurs every year.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn matches(self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }

    /// Valid when the pair exists in a leap year, so Feb 29 is accepted.
    pub fn is_valid(self) -> bool {
        NaiveDate::from_ymd_opt(2024, self.month, self.day).is_some()
    }
}

pub fn classify(date: NaiveDate, special_dates: &[MonthDay]) -> DayClassification {
    let kind = if special_dates.iter().any(|special| special.matches(date)) {
        DayKind::SpecialDay
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayKind::Weekend
    } else {
        DayKind::Weekday
    };

    DayClassification {
        kind,
        start_of_month: date.day() <= 7,
    }
}

/// Every calendar day from `start` through `end`, both included.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
