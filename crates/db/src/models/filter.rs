//! List filter parameters.
//!
//! Each filter deserializes straight from a query string. Date bounds are
//! inclusive and apply to the natural date column of the table.

use chrono::NaiveDate;
use reno_core::error::CoreError;
use reno_core::types::DbId;
use reno_core::validation::validate_date_range;
use serde::Deserialize;

/// Filter for tables that only support archive visibility.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArchiveFilter {
    #[serde(default)]
    pub include_archived: bool,
}

/// Filter for listing tasks. Dates apply to the task's start date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub include_archived: bool,
}

/// Filter for listing material purchases. Dates apply to `purchase_date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialPurchaseFilter {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub include_archived: bool,
}

/// Filter for listing work sessions. Dates apply to `work_date`;
/// `laborer_id` matches sessions with at least one entry for that laborer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkSessionFilter {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub laborer_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub include_archived: bool,
}

/// Filter shared by every report.
///
/// Unlike list filters, reports include archived rows unless told
/// otherwise: archiving retires a record from day-to-day views, it does not
/// retract money that was spent or hours that were worked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    pub project_id: Option<DbId>,
    pub laborer_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub include_archived: bool,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            project_id: None,
            laborer_id: None,
            vendor_id: None,
            task_id: None,
            from: None,
            to: None,
            include_archived: true,
        }
    }
}

impl TaskFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.from, self.to)
    }
}

impl MaterialPurchaseFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.from, self.to)
    }
}

impl WorkSessionFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.from, self.to)
    }
}

impl ReportFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.from, self.to)
    }
}
