use chrono::{NaiveDate, NaiveTime};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::calendar::{classify, days_inclusive, DayClassification, DayKind};
use super::datasets::{SyntheticEntry, TicketType};
use crate::config::{GeneratorConfig, MAX_ENTRY_ID};
use crate::error::{SeedError, SeedResult};

/// Produces ticket purchases for a date range from a validated configuration.
///
/// Sampling tables are built once in [`SyntheticEventGenerator::new`]; all
/// randomness comes from the `Rng` handed to each call.
#[derive(Debug)]
pub struct SyntheticEventGenerator<'a> {
    config: &'a GeneratorConfig,
    weekday: WeightedIndex<f64>,
    weekend: WeightedIndex<f64>,
    promotional: Vec<&'a TicketType>,
}

impl<'a> SyntheticEventGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> SeedResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            weekday: weighted_index(config, DayKind::Weekday)?,
            weekend: weighted_index(config, DayKind::Weekend)?,
            promotional: config.promotional_types(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> SeedResult<Vec<SyntheticEntry>> {
        if start_date > end_date {
            return Err(SeedError::InvalidConfig(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }

        let mut entries = Vec::new();
        let mut next_id = self.config.first_id;
        let mut days = 0usize;
        for date in days_inclusive(start_date, end_date) {
            let day = self.generate_day(date, next_id, rng)?;
            next_id = next_id
                .checked_add(day.len() as u64)
                .ok_or_else(|| id_overflow(self.config.first_id))?;
            entries.extend(day);
            days += 1;
        }

        info!(
            start = %start_date,
            end = %end_date,
            days,
            entries = entries.len(),
            "generated synthetic entries"
        );
        Ok(entries)
    }

    /// Entries for a single day, numbered from `first_id`.
    pub fn generate_day<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        first_id: u64,
        rng: &mut R,
    ) -> SeedResult<Vec<SyntheticEntry>> {
        let class = classify(date, &self.config.special_dates);
        let range = self.config.count_range(class.kind);
        let count = rng.gen_range(range.min..=range.max);
        debug!(
            %date,
            kind = class.kind.as_str(),
            start_of_month = class.start_of_month,
            count,
            "day"
        );

        let end_id = first_id
            .checked_add(u64::from(count))
            .filter(|end| *end <= MAX_ENTRY_ID + 1)
            .ok_or_else(|| id_overflow(first_id))?;

        let mut out = Vec::with_capacity(count as usize);
        for id in first_id..end_id {
            let ticket = self.pick_ticket(class, rng);
            let hours = self.config.business_hours;
            let hour = rng.gen_range(hours.start..=hours.end);
            let minute = rng.gen_range(0..=59);
            let second = rng.gen_range(0..=59);
            let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
                SeedError::InvalidConfig(format!("invalid time of day {hour}:{minute}:{second}"))
            })?;

            out.push(SyntheticEntry {
                id,
                entry_type: ticket.name.clone(),
                price: ticket.price,
                timestamp: date.and_time(time),
            });
        }
        Ok(out)
    }

    fn pick_ticket<R: Rng + ?Sized>(
        &self,
        class: DayClassification,
        rng: &mut R,
    ) -> &'a TicketType {
        if class.start_of_month && !self.promotional.is_empty() {
            if let Some(p) = self.config.override_probability() {
                if rng.gen::<f64>() < p {
                    return self.promotional[rng.gen_range(0..self.promotional.len())];
                }
            }
        }

        let table = match class.kind {
            DayKind::Weekday => &self.weekday,
            DayKind::Weekend | DayKind::SpecialDay => &self.weekend,
        };
        &self.config.ticket_types[table.sample(rng)]
    }
}

fn id_overflow(first_id: u64) -> SeedError {
    SeedError::InvalidConfig(format!(
        "first_id {first_id} overflows the maximum entry id {MAX_ENTRY_ID}"
    ))
}

fn weighted_index(config: &GeneratorConfig, kind: DayKind) -> SeedResult<WeightedIndex<f64>> {
    WeightedIndex::new(config.weights(kind)).map_err(|error| {
        SeedError::InvalidConfig(format!(
            "ticket_types {} weights are unusable: {error}",
            kind.as_str()
        ))
    })
}

pub fn generate<R: Rng + ?Sized>(
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &GeneratorConfig,
    rng: &mut R,
) -> SeedResult<Vec<SyntheticEntry>> {
    SyntheticEventGenerator::new(config)?.generate(start_date, end_date, rng)
}

pub fn generate_seeded(
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &GeneratorConfig,
    seed: u64,
) -> SeedResult<Vec<SyntheticEntry>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(start_date, end_date, config, &mut rng)
}
