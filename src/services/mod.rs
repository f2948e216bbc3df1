// Service exports
pub mod assessment;
pub mod postgres;
pub mod store;

pub use assessment::AssessmentService;
pub use postgres::PostgresAlertStore;
pub use store::{AlertStore, MemoryAlertStore, StoreError};
