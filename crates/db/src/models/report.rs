//! Row shapes fetched by the report repository.
//!
//! These mirror the input rows in `reno_core::reports` so the aggregation
//! itself stays free of any database types.

use chrono::{NaiveDateTime, NaiveTime};
use reno_core::reports::{LaborEntryRow, PurchaseCostRow, TaskSpanRow};
use reno_core::types::DbId;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PurchaseCostRecord {
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

impl From<PurchaseCostRecord> for PurchaseCostRow {
    fn from(r: PurchaseCostRecord) -> Self {
        Self {
            project_id: r.project_id,
            project_name: r.project_name,
            vendor_id: r.vendor_id,
            vendor_name: r.vendor_name,
            material_description: r.material_description,
            unit_cost: r.unit_cost,
            quantity: r.quantity,
            total_material_cost: r.total_material_cost,
            delivery_cost: r.delivery_cost,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LaborEntryRecord {
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

impl From<LaborEntryRecord> for LaborEntryRow {
    fn from(r: LaborEntryRecord) -> Self {
        Self {
            work_session_id: r.work_session_id,
            project_id: r.project_id,
            project_name: r.project_name,
            laborer_id: r.laborer_id,
            laborer_name: r.laborer_name,
            hourly_rate: r.hourly_rate,
            daily_rate: r.daily_rate,
            clock_in_time: r.clock_in_time,
            clock_out_time: r.clock_out_time,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TaskSpanRecord {
    pub task_name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
}

impl From<TaskSpanRecord> for TaskSpanRow {
    fn from(r: TaskSpanRecord) -> Self {
        Self {
            task_name: r.task_name,
            start_datetime: r.start_datetime,
            end_datetime: r.end_datetime,
        }
    }
}
