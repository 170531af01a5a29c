use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::calendar::{DayKind, MonthDay};
use crate::data::datasets::TicketType;
use crate::error::{SeedError, SeedResult};

pub const DEFAULT_START_OF_MONTH_OVERRIDE: f64 = 0.3;

/// Largest id that still fits a SQLite INTEGER.
pub const MAX_ENTRY_ID: u64 = i64::MAX as u64;

/// Inclusive `[min, max]` number of entries generated for one day.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, count: usize) -> bool {
        (self.min as usize..=self.max as usize).contains(&count)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntriesPerDay {
    pub weekday: CountRange,
    pub weekend: CountRange,
    /// Special days fall back to the weekend range when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<CountRange>,
}

impl Default for EntriesPerDay {
    fn default() -> Self {
        Self {
            weekday: CountRange::new(8, 15),
            weekend: CountRange::new(15, 25),
            special: None,
        }
    }
}

/// Inclusive hour-of-day window used for entry timestamps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: u32,
    pub end: u32,
}

impl BusinessHours {
    pub fn contains(self, hour: u32) -> bool {
        (self.start..=self.end).contains(&hour)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self { start: 9, end: 22 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub ticket_types: Vec<TicketType>,
    pub special_dates: Vec<MonthDay>,
    pub entries_per_day: EntriesPerDay,
    pub business_hours: BusinessHours,
    pub start_of_month_override: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub first_id: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ticket_types: vec![
                TicketType::new("Ticket 50", 5_000, 40.0, 25.0),
                TicketType::new("Ticket 100", 10_000, 30.0, 20.0),
                TicketType::new("Ticket 150", 15_000, 20.0, 12.0),
                TicketType::new("Ticket 200", 20_000, 10.0, 8.0),
                TicketType::new("Free Ticket", 0, 0.0, 0.0),
                TicketType::new("Artist Ticket", 0, 0.0, 0.0),
            ],
            special_dates: vec![
                MonthDay::new(1, 1),
                MonthDay::new(2, 14),
                MonthDay::new(3, 17),
                MonthDay::new(7, 4),
                MonthDay::new(10, 31),
                MonthDay::new(11, 25),
                MonthDay::new(12, 24),
                MonthDay::new(12, 25),
                MonthDay::new(12, 31),
            ],
            entries_per_day: EntriesPerDay::default(),
            business_hours: BusinessHours::default(),
            start_of_month_override: Some(DEFAULT_START_OF_MONTH_OVERRIDE),
            seed: None,
            first_id: 1,
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: impl AsRef<Path>) -> SeedResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let config = serde_yaml::from_slice::<GeneratorConfig>(&bytes).map_err(|error| {
            SeedError::InvalidConfig(format!("invalid config '{}': {error}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> SeedResult<String> {
        serde_yaml::to_string(self)
            .map_err(|error| SeedError::InvalidConfig(format!("failed to render config: {error}")))
    }

    pub fn count_range(&self, kind: DayKind) -> CountRange {
        match kind {
            DayKind::Weekday => self.entries_per_day.weekday,
            DayKind::Weekend => self.entries_per_day.weekend,
            DayKind::SpecialDay => self
                .entries_per_day
                .special
                .unwrap_or(self.entries_per_day.weekend),
        }
    }

    /// Weights aligned with `ticket_types`. Special days sample like weekends.
    pub fn weights(&self, kind: DayKind) -> Vec<f64> {
        self.ticket_types
            .iter()
            .map(|ticket| match kind {
                DayKind::Weekday => ticket.weekday_weight,
                DayKind::Weekend | DayKind::SpecialDay => ticket.weekend_weight,
            })
            .collect()
    }

    pub fn promotional_types(&self) -> Vec<&TicketType> {
        self.ticket_types
            .iter()
            .filter(|ticket| ticket.is_promotional())
            .collect()
    }

    pub fn ticket_type(&self, name: &str) -> Option<&TicketType> {
        self.ticket_types.iter().find(|ticket| ticket.name == name)
    }

    /// Override probability, with `None` and `0.0` both meaning disabled.
    pub fn override_probability(&self) -> Option<f64> {
        self.start_of_month_override.filter(|p| *p > 0.0)
    }

    pub fn validate(&self) -> SeedResult<()> {
        if self.ticket_types.is_empty() {
            return Err(invalid("ticket_types must not be empty"));
        }

        let mut names = HashSet::new();
        for ticket in &self.ticket_types {
            if ticket.name.trim().is_empty() {
                return Err(invalid("ticket_types entries must have a non-empty name"));
            }
            if !names.insert(ticket.name.as_str()) {
                return Err(invalid(format!(
                    "ticket_types contains duplicate name '{}'",
                    ticket.name
                )));
            }
            for (label, weight) in [
                ("weekday_weight", ticket.weekday_weight),
                ("weekend_weight", ticket.weekend_weight),
            ] {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(invalid(format!(
                        "ticket type '{}' has invalid {label} {weight}; \
                         weights must be non-negative",
                        ticket.name
                    )));
                }
            }
        }

        for kind in [DayKind::Weekday, DayKind::Weekend] {
            let total: f64 = self.weights(kind).iter().sum();
            if total <= 0.0 {
                return Err(invalid(format!(
                    "ticket_types {} weights sum to zero",
                    kind.as_str()
                )));
            }
        }

        for (label, range) in [
            ("weekday", Some(self.entries_per_day.weekday)),
            ("weekend", Some(self.entries_per_day.weekend)),
            ("special", self.entries_per_day.special),
        ] {
            if let Some(range) = range {
                if range.min > range.max {
                    return Err(invalid(format!(
                        "entries_per_day.{label} has min {} greater than max {}",
                        range.min, range.max
                    )));
                }
            }
        }

        let hours = self.business_hours;
        if hours.end > 23 || hours.start > hours.end {
            return Err(invalid(format!(
                "business_hours must satisfy start <= end <= 23, got {}..={}",
                hours.start, hours.end
            )));
        }

        if let Some(p) = self.start_of_month_override {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!(
                    "start_of_month_override must be within [0, 1], got {p}"
                )));
            }
        }
        if self.override_probability().is_some() && self.promotional_types().is_empty() {
            return Err(invalid(
                "start_of_month_override requires at least one zero-price ticket type",
            ));
        }

        if self.first_id > MAX_ENTRY_ID {
            return Err(invalid(format!(
                "first_id {} exceeds the maximum entry id {MAX_ENTRY_ID}",
                self.first_id
            )));
        }

        if let Some(bad) = self.special_dates.iter().find(|d| !d.is_valid()) {
            return Err(invalid(format!(
                "special_dates contains invalid month/day {}/{}",
                bad.month, bad.day
            )));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SeedError {
    SeedError::InvalidConfig(message.into())
}
