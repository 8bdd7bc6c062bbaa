//! Material purchase entity model and DTOs.

use chrono::NaiveDate;
use reno_core::archival::ArchiveState;
use reno_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `material_purchases` table.
///
/// `total_material_cost` is always `unit_cost * quantity` as computed by the
/// repository at write time.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MaterialPurchase {
    pub id: DbId,
    pub project_id: DbId,
    pub task_id: Option<DbId>,
    pub vendor_id: DbId,
    pub material_description: String,
    pub unit_cost: f64,
    pub quantity: f64,
    pub total_material_cost: f64,
    pub delivery_cost: f64,
    pub purchase_date: NaiveDate,
    #[sqlx(rename = "archived_at", try_from = "Option<Timestamp>")]
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialPurchase {
    pub project_id: DbId,
    pub task_id: Option<DbId>,
    pub vendor_id: DbId,
    pub material_description: String,
    pub unit_cost: f64,
    pub quantity: f64,
    /// Defaults to 0.
    pub delivery_cost: Option<f64>,
    pub purchase_date: NaiveDate,
    /// Accepted so existing clients can keep sending it, but never stored:
    /// the total is re-derived from `unit_cost` and `quantity`.
    #[serde(default)]
    pub total_material_cost: Option<f64>,
}

/// DTO for updating a purchase. `task_id: null` detaches the purchase from
/// its task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMaterialPurchase {
    pub project_id: Option<DbId>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub task_id: Option<Option<DbId>>,
    pub vendor_id: Option<DbId>,
    pub material_description: Option<String>,
    pub unit_cost: Option<f64>,
    pub quantity: Option<f64>,
    pub delivery_cost: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    /// Ignored; see [`CreateMaterialPurchase::total_material_cost`].
    #[serde(default)]
    pub total_material_cost: Option<f64>,
}
