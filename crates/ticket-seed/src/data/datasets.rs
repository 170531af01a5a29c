use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Non-negative amount stored as whole cents.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);
    /// Largest amount a `DECIMAL(10,2)` column holds, 99999999.99.
    pub const MAX: Price = Price(9_999_999_999);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<f64> for Price {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("price must be a non-negative number, got {value}"));
        }
        let cents = (value * 100.0).round();
        if cents > Self::MAX.0 as f64 {
            return Err(format!("price {value} exceeds the maximum of {}", Self::MAX));
        }
        Ok(Self(cents as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub weekday_weight: f64,
    #[serde(default)]
    pub weekend_weight: f64,
}

impl TicketType {
    pub fn new(name: &str, price_cents: u64, weekday_weight: f64, weekend_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            price: Price::from_cents(price_cents),
            weekday_weight,
            weekend_weight,
        }
    }

    /// Zero-price types are only handed out through the start-of-month override.
    pub fn is_promotional(&self) -> bool {
        self.price.is_zero()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SyntheticEntry {
    pub id: u64,
    pub entry_type: String,
    pub price: Price,
    pub timestamp: NaiveDateTime,
}

impl SyntheticEntry {
    pub fn entry_date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entries: usize,
    pub schema: String,
    pub sha256: String,
}
