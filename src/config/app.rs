use clientes_core::config::{ConfigBuilder, env_or};

use super::StorageConfig;

pub const DEFAULT_SERVICE_NAME: &str = "Hola Microservicio";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Reported by the health check.
    pub service_name: String,
    pub storage: StorageConfig,
}

impl ConfigBuilder for AppConfig {
    fn build() -> anyhow::Result<Self> {
        let port = env_or("SERVER_PORT", 3000);
        let service_name = env_or("SERVICE_NAME", DEFAULT_SERVICE_NAME.to_string());
        let storage = StorageConfig::build()?;

        Ok(AppConfig { port, service_name, storage })
    }
}
