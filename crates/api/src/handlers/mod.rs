pub mod laborer;
pub mod material_purchase;
pub mod project;
pub mod report;
pub mod task;
pub mod vendor;
pub mod work_session;
