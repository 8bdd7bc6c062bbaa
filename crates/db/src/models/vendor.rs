//! Vendor entity model and DTOs.

use reno_core::archival::ArchiveState;
use reno_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "archived_at", try_from = "Option<Timestamp>")]
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVendor {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendor {
    pub name: Option<String>,
}
