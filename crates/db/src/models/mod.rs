//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod filter;
pub mod laborer;
pub mod material_purchase;
pub mod project;
pub mod report;
pub mod task;
pub mod vendor;
pub mod work_session;

/// Deserialize a nullable patch field.
///
/// Used with `#[serde(default)]` so that an absent key becomes `None`
/// (leave unchanged) while an explicit `null` becomes `Some(None)` (clear).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
