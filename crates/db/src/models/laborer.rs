//! Laborer entity model and DTOs.

use reno_core::archival::ArchiveState;
use reno_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A laborer row from the `laborers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Laborer {
    pub id: DbId,
    pub name: String,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    #[sqlx(rename = "archived_at", try_from = "Option<Timestamp>")]
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new laborer. Either rate may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLaborer {
    pub name: String,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
}

/// DTO for updating a laborer. Send `null` to clear a rate, e.g. when
/// switching someone from hourly to daily pay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLaborer {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub hourly_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub daily_rate: Option<Option<f64>>,
}
