mod app;
mod database;

pub use app::AppConfig;
pub use database::{DatabaseConfig, StorageConfig};
