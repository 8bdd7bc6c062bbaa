//! Builders shared by the repository integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reno_db::models::laborer::CreateLaborer;
use reno_db::models::material_purchase::CreateMaterialPurchase;
use reno_db::models::project::CreateProject;
use reno_db::models::task::CreateTask;
use reno_db::models::vendor::CreateVendor;
use reno_db::models::work_session::{CreateWorkSession, CreateWorkSessionEntry};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

pub fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: Some("Kitchen and bath".to_string()),
        start_date: Some(date("2025-01-06")),
        end_date: None,
    }
}

pub fn new_task(project_id: i64, name: &str, start: &str, end: &str) -> CreateTask {
    CreateTask {
        project_id,
        name: name.to_string(),
        start_datetime: datetime(start),
        end_datetime: datetime(end),
    }
}

pub fn new_vendor(name: &str) -> CreateVendor {
    CreateVendor {
        name: name.to_string(),
    }
}

pub fn new_purchase(
    project_id: i64,
    vendor_id: i64,
    description: &str,
    unit_cost: f64,
    quantity: f64,
) -> CreateMaterialPurchase {
    CreateMaterialPurchase {
        project_id,
        task_id: None,
        vendor_id,
        material_description: description.to_string(),
        unit_cost,
        quantity,
        delivery_cost: None,
        purchase_date: date("2025-01-10"),
        total_material_cost: None,
    }
}

pub fn hourly_laborer(name: &str, rate: f64) -> CreateLaborer {
    CreateLaborer {
        name: name.to_string(),
        hourly_rate: Some(rate),
        daily_rate: None,
    }
}

pub fn daily_laborer(name: &str, rate: f64) -> CreateLaborer {
    CreateLaborer {
        name: name.to_string(),
        hourly_rate: None,
        daily_rate: Some(rate),
    }
}

pub fn entry(laborer_id: i64, clock_in: &str, clock_out: &str) -> CreateWorkSessionEntry {
    CreateWorkSessionEntry {
        laborer_id,
        clock_in_time: time(clock_in),
        clock_out_time: time(clock_out),
    }
}

pub fn new_session(
    project_id: i64,
    task_id: i64,
    work_date: &str,
    entries: Vec<CreateWorkSessionEntry>,
) -> CreateWorkSession {
    CreateWorkSession {
        project_id,
        task_id,
        work_date: date(work_date),
        entries,
    }
}
