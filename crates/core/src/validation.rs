//! Field and record validation rules.
//!
//! Every write path runs these checks before anything is derived or
//! persisted. Each helper returns `CoreError::Validation` naming the
//! offending field so the transport layer can surface the message verbatim.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;

/// Trim `value` and reject it if nothing is left.
pub fn require_text(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "Missing required field: {field}."
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject negative, NaN and infinite amounts.
pub fn ensure_non_negative(value: f64, field: &str) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{field} must be a number.")));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be non-negative."
        )));
    }
    Ok(value)
}

/// Same as [`ensure_non_negative`] for optional amounts; `None` passes.
pub fn ensure_optional_non_negative(
    value: Option<f64>,
    field: &str,
) -> Result<Option<f64>, CoreError> {
    value.map(|v| ensure_non_negative(v, field)).transpose()
}

/// A project's end date may equal its start date but never precede it.
pub fn validate_project_dates(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(CoreError::Validation(
                "end_date must be on or after start_date.".to_string(),
            ));
        }
    }
    Ok(())
}

/// Tasks must end strictly after they start.
pub fn validate_task_span(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(
            "end_datetime must be after start_datetime.".to_string(),
        ));
    }
    Ok(())
}

/// A work session entry models one shift within a single day.
///
/// Both times are read as times-of-day on the same date, so an entry that
/// would wrap past midnight (e.g. 22:00 -> 02:00) is rejected rather than
/// interpreted as an overnight shift.
pub fn validate_clock_span(clock_in: NaiveTime, clock_out: NaiveTime) -> Result<(), CoreError> {
    if clock_out <= clock_in {
        return Err(CoreError::Validation(
            "clock_out_time must be after clock_in_time.".to_string(),
        ));
    }
    Ok(())
}

/// Purchases are recorded after the fact; a future date is a typo.
pub fn validate_purchase_date(purchase_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if purchase_date > today {
        return Err(CoreError::Validation(
            "purchase_date cannot be in the future.".to_string(),
        ));
    }
    Ok(())
}

/// Validate an inclusive `from..=to` filter range.
pub fn validate_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(CoreError::Validation(
                "from must be on or before to.".to_string(),
            ));
        }
    }
    Ok(())
}
