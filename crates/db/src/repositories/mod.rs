//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument. Writes validate their input,
//! check references and derive computed columns inside one transaction.

mod support;

pub mod laborer_repo;
pub mod material_purchase_repo;
pub mod project_repo;
pub mod report_repo;
pub mod task_repo;
pub mod vendor_repo;
pub mod work_session_repo;

pub use laborer_repo::LaborerRepo;
pub use material_purchase_repo::MaterialPurchaseRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use task_repo::TaskRepo;
pub use vendor_repo::VendorRepo;
pub use work_session_repo::WorkSessionRepo;
