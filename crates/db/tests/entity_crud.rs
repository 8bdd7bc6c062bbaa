//! Integration tests for create / read / update / list across the ledger
//! entities, including validation and reference checks.

mod common;

use assert_matches::assert_matches;
use common::*;
use reno_core::error::CoreError;
use reno_core::pagination::PageRequest;
use reno_db::models::filter::{ArchiveFilter, TaskFilter, WorkSessionFilter};
use reno_db::models::laborer::UpdateLaborer;
use reno_db::models::material_purchase::UpdateMaterialPurchase;
use reno_db::models::project::UpdateProject;
use reno_db::models::task::UpdateTask;
use reno_db::models::work_session::UpdateWorkSession;
use reno_db::repositories::{
    LaborerRepo, MaterialPurchaseRepo, ProjectRepo, TaskRepo, VendorRepo, WorkSessionRepo,
};
use reno_db::DbError;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_create_and_find(pool: SqlitePool) {
    let mut input = new_project("  Maple Street  ");
    input.description = Some("   ".to_string());
    let project = ProjectRepo::create(&pool, &input).await.unwrap();

    assert_eq!(project.name, "Maple Street");
    assert_eq!(project.description, None, "blank description is stored as NULL");
    assert!(!project.archive.is_archived());

    let found = ProjectRepo::find_by_id(&pool, project.id).await.unwrap();
    assert_eq!(found, Some(project));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_rejects_blank_name_and_inverted_dates(pool: SqlitePool) {
    let err = ProjectRepo::create(&pool, &new_project("   ")).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let mut input = new_project("Backwards");
    input.end_date = Some(date("2025-01-01"));
    let err = ProjectRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let page = ProjectRepo::list(&pool, &ArchiveFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0, "failed creates must persist nothing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_partial_update_and_clear(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Loft")).await.unwrap();

    let update = UpdateProject {
        description: Some(None),
        end_date: Some(Some(date("2025-03-01"))),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, &update).await.unwrap();

    assert_eq!(updated.name, "Loft", "absent fields are unchanged");
    assert_eq!(updated.description, None, "explicit null clears");
    assert_eq!(updated.end_date, Some(date("2025-03-01")));
    assert!(updated.updated_at >= project.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_update_validates_merged_dates(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Loft")).await.unwrap();

    // start_date is 2025-01-06; moving only the end before it must fail.
    let update = UpdateProject {
        end_date: Some(Some(date("2025-01-01"))),
        ..Default::default()
    };
    let err = ProjectRepo::update(&pool, project.id, &update).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let unchanged = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(unchanged.end_date, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_project_is_not_found(pool: SqlitePool) {
    let err = ProjectRepo::update(&pool, 999, &UpdateProject::default())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Project", id: 999 })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_paginates(pool: SqlitePool) {
    for i in 0..5 {
        ProjectRepo::create(&pool, &new_project(&format!("Project {i}")))
            .await
            .unwrap();
    }

    let page = PageRequest::new(Some(2), Some(2), 100).unwrap();
    let result = ProjectRepo::list(&pool, &ArchiveFilter::default(), page)
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.total_pages, 3);
    let names: Vec<_> = result.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project 2", "Project 3"]);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_requires_existing_project(pool: SqlitePool) {
    let err = TaskRepo::create(
        &pool,
        &new_task(42, "Demo", "2025-01-10 08:00", "2025-01-10 12:00"),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_rejects_empty_or_inverted_span(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Loft")).await.unwrap();

    let err = TaskRepo::create(
        &pool,
        &new_task(project.id, "Demo", "2025-01-10 09:00", "2025-01-10 09:00"),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let err = TaskRepo::create(
        &pool,
        &new_task(project.id, "Demo", "2025-01-10 09:00", "2025-01-10 08:00"),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let page = TaskRepo::list(&pool, &TaskFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_update_validates_merged_span(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Loft")).await.unwrap();
    let task = TaskRepo::create(
        &pool,
        &new_task(project.id, "Demo", "2025-01-10 08:00", "2025-01-10 12:00"),
    )
    .await
    .unwrap();

    let update = UpdateTask {
        start_datetime: Some(datetime("2025-01-10 13:00")),
        ..Default::default()
    };
    let err = TaskRepo::update(&pool, task.id, &update).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_list_filters_by_project_and_start_date(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    TaskRepo::create(&pool, &new_task(a.id, "Early", "2025-01-05 08:00", "2025-01-05 12:00"))
        .await
        .unwrap();
    let late = TaskRepo::create(&pool, &new_task(a.id, "Late", "2025-02-05 08:00", "2025-02-05 12:00"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(b.id, "Other", "2025-02-05 08:00", "2025-02-05 12:00"))
        .await
        .unwrap();

    let filter = TaskFilter {
        project_id: Some(a.id),
        from: Some(date("2025-02-05")),
        to: Some(date("2025-02-05")),
        ..Default::default()
    };
    let page = TaskRepo::list(&pool, &filter, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1, "date bounds are inclusive");
    assert_eq!(page.items[0].id, late.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_inverted_date_range(pool: SqlitePool) {
    let filter = TaskFilter {
        from: Some(date("2025-02-01")),
        to: Some(date("2025-01-01")),
        ..Default::default()
    };
    let err = TaskRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_cannot_move_projects_while_referenced(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Lumber Co")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(a.id, "Framing", "2025-01-10 08:00", "2025-01-10 16:00"))
        .await
        .unwrap();

    let mut purchase = new_purchase(a.id, vendor.id, "2x4 stud", 3.5, 40.0);
    purchase.task_id = Some(task.id);
    MaterialPurchaseRepo::create(&pool, &purchase).await.unwrap();

    let update = UpdateTask {
        project_id: Some(b.id),
        ..Default::default()
    };
    let err = TaskRepo::update(&pool, task.id, &update).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unreferenced_task_can_move_projects(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(a.id, "Framing", "2025-01-10 08:00", "2025-01-10 16:00"))
        .await
        .unwrap();

    let update = UpdateTask {
        project_id: Some(b.id),
        ..Default::default()
    };
    let moved = TaskRepo::update(&pool, task.id, &update).await.unwrap();
    assert_eq!(moved.project_id, b.id);
}

// ---------------------------------------------------------------------------
// Material purchases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_task_must_belong_to_project(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Tile Depot")).await.unwrap();
    let task_in_b = TaskRepo::create(&pool, &new_task(b.id, "Tiling", "2025-01-10 08:00", "2025-01-10 16:00"))
        .await
        .unwrap();

    let mut input = new_purchase(a.id, vendor.id, "Porcelain tile", 4.25, 120.0);
    input.task_id = Some(task_in_b.id);
    let err = MaterialPurchaseRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_requires_existing_vendor(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let err = MaterialPurchaseRepo::create(&pool, &new_purchase(project.id, 77, "Grout", 12.0, 2.0))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_rejects_negative_amounts_and_future_dates(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Tile Depot")).await.unwrap();

    let err = MaterialPurchaseRepo::create(&pool, &new_purchase(project.id, vendor.id, "Grout", -1.0, 2.0))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let mut input = new_purchase(project.id, vendor.id, "Grout", 12.0, 2.0);
    input.delivery_cost = Some(-5.0);
    let err = MaterialPurchaseRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let mut input = new_purchase(project.id, vendor.id, "Grout", 12.0, 2.0);
    input.purchase_date = chrono::Utc::now().date_naive() + chrono::Duration::days(2);
    let err = MaterialPurchaseRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_references_to_archived_rows_are_allowed(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Old Supplier")).await.unwrap();
    VendorRepo::archive(&pool, vendor.id).await.unwrap();

    let purchase = MaterialPurchaseRepo::create(&pool, &new_purchase(project.id, vendor.id, "Nails", 9.0, 1.0))
        .await
        .unwrap();
    assert_eq!(purchase.vendor_id, vendor.id);
}

// ---------------------------------------------------------------------------
// Laborers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_laborer_rates_can_be_switched(pool: SqlitePool) {
    let laborer = LaborerRepo::create(&pool, &hourly_laborer("Ana", 32.0)).await.unwrap();

    let update = UpdateLaborer {
        hourly_rate: Some(None),
        daily_rate: Some(Some(240.0)),
        ..Default::default()
    };
    let updated = LaborerRepo::update(&pool, laborer.id, &update).await.unwrap();
    assert_eq!(updated.hourly_rate, None);
    assert_eq!(updated.daily_rate, Some(240.0));

    let err = LaborerRepo::update(
        &pool,
        laborer.id,
        &UpdateLaborer {
            daily_rate: Some(Some(-1.0)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_laborer_without_rates_is_allowed(pool: SqlitePool) {
    let input = reno_db::models::laborer::CreateLaborer {
        name: "Volunteer".to_string(),
        hourly_rate: None,
        daily_rate: None,
    };
    let laborer = LaborerRepo::create(&pool, &input).await.unwrap();
    assert_eq!(laborer.hourly_rate, None);
    assert_eq!(laborer.daily_rate, None);
}

// ---------------------------------------------------------------------------
// Work sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_created_with_entries(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Drywall", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();
    let ben = LaborerRepo::create(&pool, &daily_laborer("Ben", 220.0)).await.unwrap();

    let created = WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![entry(ana.id, "08:00", "12:00"), entry(ben.id, "09:00", "17:00")],
        ),
    )
    .await
    .unwrap();

    assert_eq!(created.entries.len(), 2);
    assert!(created.entries.iter().all(|e| e.work_session_id == created.session.id));

    let found = WorkSessionRepo::find_by_id(&pool, created.session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_with_invalid_entry_persists_nothing(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Drywall", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();

    let err = WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![entry(ana.id, "08:00", "12:00"), entry(ana.id, "13:00", "13:00")],
        ),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    // One unknown laborer rejects the whole session.
    let err = WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![entry(ana.id, "08:00", "12:00"), entry(999, "13:00", "15:00")],
        ),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));

    let page = WorkSessionRepo::list(&pool, &WorkSessionFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_task_must_belong_to_project(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let task_in_b = TaskRepo::create(&pool, &new_task(b.id, "Paint", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();

    let err = WorkSessionRepo::create(&pool, &new_session(a.id, task_in_b.id, "2025-01-10", vec![]))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_update_replaces_entries(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Drywall", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();
    let ben = LaborerRepo::create(&pool, &hourly_laborer("Ben", 28.0)).await.unwrap();

    let created = WorkSessionRepo::create(
        &pool,
        &new_session(project.id, task.id, "2025-01-10", vec![entry(ana.id, "08:00", "12:00")]),
    )
    .await
    .unwrap();

    // Without `entries` the existing ones are kept.
    let kept = WorkSessionRepo::update(
        &pool,
        created.session.id,
        &UpdateWorkSession {
            work_date: Some(date("2025-01-11")),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(kept.session.work_date, date("2025-01-11"));
    assert_eq!(kept.entries, created.entries);

    let replaced = WorkSessionRepo::update(
        &pool,
        created.session.id,
        &UpdateWorkSession {
            entries: Some(vec![entry(ben.id, "10:00", "14:30"), entry(ana.id, "13:00", "15:00")]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.entries.len(), 2);
    assert!(replaced.entries.iter().all(|e| e.work_session_id == created.session.id));
    assert!(replaced.entries.iter().any(|e| e.laborer_id == ben.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_update_with_inverted_entry_keeps_old_entries(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Drywall", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();

    let created = WorkSessionRepo::create(
        &pool,
        &new_session(project.id, task.id, "2025-01-10", vec![entry(ana.id, "08:00", "12:00")]),
    )
    .await
    .unwrap();

    for (clock_in, clock_out) in [("14:00", "14:00"), ("15:00", "09:00")] {
        let err = WorkSessionRepo::update(
            &pool,
            created.session.id,
            &UpdateWorkSession {
                entries: Some(vec![entry(ana.id, "07:00", "08:00"), entry(ana.id, clock_in, clock_out)]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_matches!(err, DbError::Core(CoreError::Validation(_)));
    }

    let found = WorkSessionRepo::find_by_id(&pool, created.session.id).await.unwrap().unwrap();
    assert_eq!(found.entries, created.entries);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_update_cannot_move_project_away_from_its_task(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let task_in_a = TaskRepo::create(&pool, &new_task(a.id, "Paint", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let created = WorkSessionRepo::create(&pool, &new_session(a.id, task_in_a.id, "2025-01-10", vec![]))
        .await
        .unwrap();

    let err = WorkSessionRepo::update(
        &pool,
        created.session.id,
        &UpdateWorkSession {
            project_id: Some(b.id),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));

    let found = WorkSessionRepo::find_by_id(&pool, created.session.id).await.unwrap().unwrap();
    assert_eq!(found.session.project_id, a.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_update_rejects_task_from_other_project(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let vendor = VendorRepo::create(&pool, &new_vendor("Tile Depot")).await.unwrap();
    let task_in_b = TaskRepo::create(&pool, &new_task(b.id, "Tiling", "2025-01-10 08:00", "2025-01-10 16:00"))
        .await
        .unwrap();
    let purchase = MaterialPurchaseRepo::create(&pool, &new_purchase(a.id, vendor.id, "Porcelain tile", 4.25, 120.0))
        .await
        .unwrap();

    let err = MaterialPurchaseRepo::update(
        &pool,
        purchase.id,
        &UpdateMaterialPurchase {
            task_id: Some(Some(task_in_b.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Reference(_)));

    let found = MaterialPurchaseRepo::find_by_id(&pool, purchase.id).await.unwrap().unwrap();
    assert_eq!(found.task_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_list_filters_by_laborer(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Drywall", "2025-01-10 08:00", "2025-01-10 17:00"))
        .await
        .unwrap();
    let ana = LaborerRepo::create(&pool, &hourly_laborer("Ana", 30.0)).await.unwrap();
    let ben = LaborerRepo::create(&pool, &hourly_laborer("Ben", 28.0)).await.unwrap();

    let shared = WorkSessionRepo::create(
        &pool,
        &new_session(
            project.id,
            task.id,
            "2025-01-10",
            vec![entry(ana.id, "08:00", "12:00"), entry(ben.id, "08:00", "12:00")],
        ),
    )
    .await
    .unwrap();
    WorkSessionRepo::create(
        &pool,
        &new_session(project.id, task.id, "2025-01-11", vec![entry(ana.id, "08:00", "12:00")]),
    )
    .await
    .unwrap();

    let filter = WorkSessionFilter {
        laborer_id: Some(ben.id),
        ..Default::default()
    };
    let page = WorkSessionRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].session.id, shared.session.id);
    assert_eq!(page.items[0].entries.len(), 2, "all entries of the session are returned");
}
