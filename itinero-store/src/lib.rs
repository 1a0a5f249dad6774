pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod dataset;

pub use booking_repo::SqliteBookingStore;
pub use database::DbClient;
pub use dataset::DatasetCatalog;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Dataset file not found: {}", .0.display())]
    DataUnavailable(PathBuf),
    #[error("Dataset read failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
