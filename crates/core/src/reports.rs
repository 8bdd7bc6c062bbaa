//! Report aggregation over already-validated ledger rows.
//!
//! Every function here is a pure fold over rows the repository layer has
//! already filtered (by project, date range, archive state, ...). Sums are
//! accumulated unrounded and rounded to cents/hundredths once at the end.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::derivation::{entry_hours, round2, task_hours, Compensation};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Input rows
// ---------------------------------------------------------------------------

/// One material purchase as seen by the spend reports.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseCostRow {
    pub project_id: DbId,
    pub project_name: String,
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub material_description: String,
    pub unit_cost: f64,
    pub quantity: f64,
    pub total_material_cost: f64,
    pub delivery_cost: f64,
}

/// One work session entry joined with its session, project and laborer.
#[derive(Debug, Clone, PartialEq)]
pub struct LaborEntryRow {
    pub work_session_id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub laborer_id: DbId,
    pub laborer_name: String,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub clock_in_time: NaiveTime,
    pub clock_out_time: NaiveTime,
}

impl LaborEntryRow {
    pub fn hours(&self) -> f64 {
        entry_hours(self.clock_in_time, self.clock_out_time)
    }
}

/// A task's name and scheduled span.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpanRow {
    pub task_name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSpend {
    pub project_id: DbId,
    pub project_name: String,
    pub purchase_count: i64,
    pub material_cost: f64,
    pub delivery_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSpend {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub purchase_count: i64,
    pub material_cost: f64,
    pub delivery_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborerHours {
    pub laborer_id: DbId,
    pub laborer_name: String,
    pub entry_count: i64,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHours {
    pub project_id: DbId,
    pub project_name: String,
    pub entry_count: i64,
    pub hours: f64,
}

/// Hours and gross pay per laborer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborerPay {
    pub laborer_id: DbId,
    pub laborer_name: String,
    pub compensation: Compensation,
    pub sessions_worked: i64,
    pub hours: f64,
    pub gross_pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDuration {
    pub task_name: String,
    pub sample_count: i64,
    pub average_hours: f64,
}

/// Both groupings of the hours report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursReport {
    pub by_laborer: Vec<LaborerHours>,
    pub by_project: Vec<ProjectHours>,
    pub total_hours: f64,
}

// ---------------------------------------------------------------------------
// Spend
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SpendAcc {
    name: String,
    count: i64,
    material: f64,
    delivery: f64,
}

impl SpendAcc {
    fn add(&mut self, row: &PurchaseCostRow) {
        self.count += 1;
        self.material += row.total_material_cost;
        self.delivery += row.delivery_cost;
    }
}

/// Σ(total_material_cost + delivery_cost) grouped by project.
pub fn project_spend(rows: &[PurchaseCostRow]) -> Vec<ProjectSpend> {
    let mut groups: BTreeMap<DbId, SpendAcc> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.project_id).or_insert_with(|| SpendAcc {
            name: row.project_name.clone(),
            ..SpendAcc::default()
        });
        acc.add(row);
    }
    groups
        .into_iter()
        .map(|(project_id, acc)| ProjectSpend {
            project_id,
            project_name: acc.name,
            purchase_count: acc.count,
            material_cost: round2(acc.material),
            delivery_cost: round2(acc.delivery),
            total_cost: round2(acc.material + acc.delivery),
        })
        .collect()
}

/// Σ(total_material_cost + delivery_cost) grouped by vendor.
pub fn vendor_spend(rows: &[PurchaseCostRow]) -> Vec<VendorSpend> {
    let mut groups: BTreeMap<DbId, SpendAcc> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.vendor_id).or_insert_with(|| SpendAcc {
            name: row.vendor_name.clone(),
            ..SpendAcc::default()
        });
        acc.add(row);
    }
    groups
        .into_iter()
        .map(|(vendor_id, acc)| VendorSpend {
            vendor_id,
            vendor_name: acc.name,
            purchase_count: acc.count,
            material_cost: round2(acc.material),
            delivery_cost: round2(acc.delivery),
            total_cost: round2(acc.material + acc.delivery),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Labor
// ---------------------------------------------------------------------------

/// Hours worked, summed per laborer and per project.
pub fn hours_worked(rows: &[LaborEntryRow]) -> HoursReport {
    let mut by_laborer: BTreeMap<DbId, (String, i64, f64)> = BTreeMap::new();
    let mut by_project: BTreeMap<DbId, (String, i64, f64)> = BTreeMap::new();
    let mut total = 0.0;

    for row in rows {
        let hours = row.hours();
        total += hours;

        let l = by_laborer
            .entry(row.laborer_id)
            .or_insert_with(|| (row.laborer_name.clone(), 0, 0.0));
        l.1 += 1;
        l.2 += hours;

        let p = by_project
            .entry(row.project_id)
            .or_insert_with(|| (row.project_name.clone(), 0, 0.0));
        p.1 += 1;
        p.2 += hours;
    }

    HoursReport {
        by_laborer: by_laborer
            .into_iter()
            .map(|(laborer_id, (laborer_name, entry_count, hours))| LaborerHours {
                laborer_id,
                laborer_name,
                entry_count,
                hours: round2(hours),
            })
            .collect(),
        by_project: by_project
            .into_iter()
            .map(|(project_id, (project_name, entry_count, hours))| ProjectHours {
                project_id,
                project_name,
                entry_count,
                hours: round2(hours),
            })
            .collect(),
        total_hours: round2(total),
    }
}

/// Gross pay per laborer.
///
/// Hourly laborers are paid per entry (hours x rate); daily laborers are
/// paid once for every distinct work session they appear in, no matter how
/// many entries they have inside it.
pub fn payroll(rows: &[LaborEntryRow]) -> Vec<LaborerPay> {
    struct Acc {
        name: String,
        compensation: Compensation,
        sessions: BTreeSet<DbId>,
        hours: f64,
    }

    let mut groups: BTreeMap<DbId, Acc> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.laborer_id).or_insert_with(|| Acc {
            name: row.laborer_name.clone(),
            compensation: Compensation::from_rates(row.hourly_rate, row.daily_rate),
            sessions: BTreeSet::new(),
            hours: 0.0,
        });
        acc.sessions.insert(row.work_session_id);
        acc.hours += row.hours();
    }

    groups
        .into_iter()
        .map(|(laborer_id, acc)| LaborerPay {
            laborer_id,
            laborer_name: acc.name,
            compensation: acc.compensation,
            sessions_worked: acc.sessions.len() as i64,
            hours: round2(acc.hours),
            gross_pay: round2(acc.compensation.gross_pay(acc.hours, acc.sessions.len())),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Task durations
// ---------------------------------------------------------------------------

/// Unrounded mean duration and sample count per task name.
///
/// Names are grouped after trimming, so "Demo" and "Demo " share a bucket.
pub(crate) fn group_task_durations(rows: &[TaskSpanRow]) -> BTreeMap<String, (i64, f64)> {
    let mut groups: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for row in rows {
        let g = groups
            .entry(row.task_name.trim().to_string())
            .or_insert((0, 0.0));
        g.0 += 1;
        g.1 += task_hours(row.start_datetime, row.end_datetime);
    }
    for g in groups.values_mut() {
        g.1 /= g.0 as f64;
    }
    groups
}

/// Mean of (end_datetime - start_datetime) in hours, grouped by task name.
pub fn average_task_durations(rows: &[TaskSpanRow]) -> Vec<TaskDuration> {
    group_task_durations(rows)
        .into_iter()
        .map(|(task_name, (sample_count, mean))| TaskDuration {
            task_name,
            sample_count,
            average_hours: round2(mean),
        })
        .collect()
}
