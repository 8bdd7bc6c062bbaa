//! Derived scalar fields: purchase totals, hours worked, compensation.
//!
//! These functions are the single source of truth for every stored or
//! reported value that is computed from other fields. Callers never supply
//! a derived value themselves.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Seconds per hour (3600.0).
pub const SECS_PER_HOUR: f64 = 3600.0;

/// Total material cost of a purchase line.
///
/// Inputs are expected to have passed validation (finite, non-negative).
pub fn derive_total(unit_cost: f64, quantity: f64) -> f64 {
    unit_cost * quantity
}

/// Hours between clock-in and clock-out on the same day.
pub fn entry_hours(clock_in: NaiveTime, clock_out: NaiveTime) -> f64 {
    (clock_out - clock_in).num_seconds() as f64 / SECS_PER_HOUR
}

/// Scheduled duration of a task in hours.
pub fn task_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / SECS_PER_HOUR
}

/// Round to two decimal places (report precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Compensation
// ---------------------------------------------------------------------------

/// How a laborer is paid.
///
/// An hourly rate wins over a daily rate when both are set; a laborer with
/// neither is recorded but earns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "rate", rename_all = "snake_case")]
pub enum Compensation {
    Hourly(f64),
    Daily(f64),
    Unpaid,
}

impl Compensation {
    pub fn from_rates(hourly_rate: Option<f64>, daily_rate: Option<f64>) -> Self {
        match (hourly_rate, daily_rate) {
            (Some(rate), _) => Self::Hourly(rate),
            (None, Some(rate)) => Self::Daily(rate),
            (None, None) => Self::Unpaid,
        }
    }

    /// Gross pay for `hours` worked across `sessions` distinct work sessions.
    ///
    /// The daily rate is charged once per session regardless of how many
    /// entries the laborer has inside it.
    pub fn gross_pay(self, hours: f64, sessions: usize) -> f64 {
        match self {
            Self::Hourly(rate) => hours * rate,
            Self::Daily(rate) => sessions as f64 * rate,
            Self::Unpaid => 0.0,
        }
    }
}
