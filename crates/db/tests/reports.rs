//! Integration tests for the report queries: filtering and archive
//! handling happen in SQL, aggregation in `reno_core::reports`.

mod common;

use assert_matches::assert_matches;
use common::*;
use reno_core::derivation::Compensation;
use reno_core::error::CoreError;
use reno_core::estimation::{EstimateConfidence, EstimateRequest, LaborForecast, MaterialForecast};
use reno_db::models::filter::ReportFilter;
use reno_db::repositories::{
    LaborerRepo, MaterialPurchaseRepo, ProjectRepo, ReportRepo, TaskRepo, VendorRepo,
    WorkSessionRepo,
};
use reno_db::DbError;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_spend_includes_delivery(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Lumber Co")).await.unwrap();
    let mut input = new_purchase(project.id, vendor.id, "Plywood sheet", 2.40, 180.0);
    input.delivery_cost = Some(45.0);
    MaterialPurchaseRepo::create(&pool, &input).await.unwrap();

    let spend = ReportRepo::project_spend(&pool, &ReportFilter::default())
        .await
        .unwrap();

    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].project_id, project.id);
    assert_eq!(spend[0].material_cost, 432.0);
    assert_eq!(spend[0].delivery_cost, 45.0);
    assert_eq!(spend[0].total_cost, 477.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reports_include_archived_unless_excluded(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Lumber Co")).await.unwrap();
    MaterialPurchaseRepo::create(&pool, &new_purchase(project.id, vendor.id, "Tile", 4.0, 25.0))
        .await
        .unwrap();
    let archived = MaterialPurchaseRepo::create(&pool, &new_purchase(project.id, vendor.id, "Grout", 10.0, 2.0))
        .await
        .unwrap();
    MaterialPurchaseRepo::archive(&pool, archived.id).await.unwrap();
    // Archiving the vendor itself never hides its purchases.
    VendorRepo::archive(&pool, vendor.id).await.unwrap();

    let all = ReportRepo::vendor_spend(&pool, &ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(all[0].purchase_count, 2);
    assert_eq!(all[0].total_cost, 120.0);

    let active_only = ReportFilter {
        include_archived: false,
        ..Default::default()
    };
    let active = ReportRepo::vendor_spend(&pool, &active_only).await.unwrap();
    assert_eq!(active[0].purchase_count, 1);
    assert_eq!(active[0].total_cost, 100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_spend_filters_by_date_range(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Lumber Co")).await.unwrap();
    let mut january = new_purchase(project.id, vendor.id, "Tile", 4.0, 25.0);
    january.purchase_date = date("2025-01-31");
    let mut february = new_purchase(project.id, vendor.id, "Tile", 4.0, 10.0);
    february.purchase_date = date("2025-02-01");
    MaterialPurchaseRepo::create(&pool, &january).await.unwrap();
    MaterialPurchaseRepo::create(&pool, &february).await.unwrap();

    let filter = ReportFilter {
        from: Some(date("2025-01-01")),
        to: Some(date("2025-01-31")),
        ..Default::default()
    };
    let spend = ReportRepo::project_spend(&pool, &filter).await.unwrap();
    assert_eq!(spend[0].total_cost, 100.0);

    let inverted = ReportFilter {
        from: Some(date("2025-02-01")),
        to: Some(date("2025-01-01")),
        ..Default::default()
    };
    assert_matches!(
        ReportRepo::project_spend(&pool, &inverted).await,
        Err(DbError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hours_and_payroll(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Cabinets", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();
    let ben = LaborerRepo::create(&pool, &daily_laborer("Ben", 200.0)).await.unwrap();

    WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![
                entry(ana.id, "08:05", "16:45"),
                entry(ben.id, "08:00", "12:00"),
                entry(ben.id, "13:00", "17:00"),
            ],
        ),
    )
    .await
    .unwrap();

    let hours = ReportRepo::labor_hours(&pool, &ReportFilter::default())
        .await
        .unwrap();
    let ana_hours = hours.by_laborer.iter().find(|h| h.laborer_id == ana.id).unwrap();
    assert_eq!(ana_hours.hours, 8.67);
    assert_eq!(hours.by_project.len(), 1);

    let payroll = ReportRepo::payroll(&pool, &ReportFilter::default()).await.unwrap();
    let ben_pay = payroll.iter().find(|p| p.laborer_id == ben.id).unwrap();
    assert_eq!(ben_pay.compensation, Compensation::Daily(200.0));
    assert_eq!(ben_pay.sessions_worked, 1);
    assert_eq!(ben_pay.gross_pay, 200.0, "one daily rate per session");

    let ana_pay = payroll.iter().find(|p| p.laborer_id == ana.id).unwrap();
    assert_eq!(ana_pay.gross_pay, 260.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_payroll_filters_by_laborer(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Cabinets", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();
    let ben = LaborerRepo::create(&pool, &daily_laborer("Ben", 200.0)).await.unwrap();
    WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![entry(ana.id, "08:00", "10:00"), entry(ben.id, "08:00", "12:00")],
        ),
    )
    .await
    .unwrap();

    let filter = ReportFilter {
        laborer_id: Some(ben.id),
        ..Default::default()
    };
    let payroll = ReportRepo::payroll(&pool, &filter).await.unwrap();
    assert_eq!(payroll.len(), 1);
    assert_eq!(payroll[0].laborer_id, ben.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_durations_grouped_by_name(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    TaskRepo::create(&pool, &new_task(project.id, "Demo", "2025-01-10 08:00", "2025-01-10 12:00"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(project.id, "Demo", "2025-01-11 08:00", "2025-01-11 14:00"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(project.id, "Paint", "2025-01-12 08:00", "2025-01-12 09:30"))
        .await
        .unwrap();

    let durations = ReportRepo::task_durations(&pool, &ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(durations.len(), 2);
    assert_eq!(durations[0].task_name, "Demo");
    assert_eq!(durations[0].sample_count, 2);
    assert_eq!(durations[0].average_hours, 5.0);
    assert_eq!(durations[1].average_hours, 1.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_estimate_from_history(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Lumber Co")).await.unwrap();
    let mut tile = new_purchase(project.id, vendor.id, "Tile", 4.0, 25.0);
    tile.delivery_cost = Some(20.0);
    MaterialPurchaseRepo::create(&pool, &tile).await.unwrap();
    let mut more_tile = new_purchase(project.id, vendor.id, "tile", 6.0, 10.0);
    more_tile.delivery_cost = Some(0.0);
    MaterialPurchaseRepo::create(&pool, &more_tile).await.unwrap();
    TaskRepo::create(&pool, &new_task(project.id, "Tiling", "2025-01-10 08:00", "2025-01-10 16:00"))
        .await
        .unwrap();

    let request = EstimateRequest {
        project_id: Some(project.id),
        materials: vec![
            MaterialForecast {
                material_description: "TILE".to_string(),
                quantity: 10.0,
            },
            MaterialForecast {
                material_description: "Marble slab".to_string(),
                quantity: 1.0,
            },
        ],
        labor: vec![LaborForecast {
            task_name: "Tiling".to_string(),
            hourly_rate: 25.0,
        }],
    };
    let estimate = ReportRepo::estimate(&pool, &request).await.unwrap();

    // Tile averages 5.00/unit; Tiling averages 8h; delivery averages 10.00.
    assert_eq!(estimate.material_cost, 50.0);
    assert_eq!(estimate.labor_cost, 200.0);
    assert_eq!(estimate.delivery_cost, 10.0);
    assert_eq!(estimate.total_cost, 260.0);
    assert_eq!(estimate.unmatched_materials, ["Marble slab"]);
    assert_eq!(estimate.confidence, EstimateConfidence::Low);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_estimate_rejects_empty_request(pool: SqlitePool) {
    assert_matches!(
        ReportRepo::estimate(&pool, &EstimateRequest::default()).await,
        Err(DbError::Core(CoreError::Validation(_)))
    );
}
