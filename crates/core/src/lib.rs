//! Domain logic for the renovation ledger.
//!
//! Everything in this crate is pure: validation rules, derived-field
//! computation, archive state, pagination bounds, report aggregation and
//! estimation. Persistence lives in `reno-db`.

pub mod archival;
pub mod derivation;
pub mod error;
pub mod estimation;
pub mod pagination;
pub mod reports;
pub mod types;
pub mod validation;
