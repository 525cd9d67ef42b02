use std::fmt;

use anyhow::{Context, anyhow, bail};
use clientes_core::config::{ConfigBuilder, env_opt, env_or};
use url::Url;

/// Which `ClienteStore` the service runs on, from `STORAGE_BACKEND`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    Memory,
}

impl StorageConfig {
    fn backend(raw: Option<&str>) -> anyhow::Result<Backend> {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            None | Some("postgres") => Ok(Backend::Postgres),
            Some("memory") => Ok(Backend::Memory),
            Some(other) => bail!("unknown `STORAGE_BACKEND` {:?}, expected `postgres` or `memory`", other),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Backend {
    Postgres,
    Memory,
}

impl ConfigBuilder for StorageConfig {
    fn build() -> anyhow::Result<Self> {
        match Self::backend(env_opt("STORAGE_BACKEND").as_deref())? {
            Backend::Postgres => Ok(StorageConfig::Postgres(DatabaseConfig::build()?)),
            Backend::Memory => Ok(StorageConfig::Memory),
        }
    }
}

/// Postgres connection parameters. `url` (from `DATABASE_URL`) takes
/// precedence over the individual fields.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            host: "db".into(),
            port: 5432,
            user: "admin".into(),
            password: "admin123".into(),
            name: "clientes_db".into(),
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl ConfigBuilder for DatabaseConfig {
    fn build() -> anyhow::Result<Self> {
        let defaults = DatabaseConfig::default();

        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections);
        let connect_timeout_secs = env_or("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout_secs);

        if let Some(url) = env_opt("DATABASE_URL") {
            tracing::info!("using `DATABASE_URL`, individual `DATABASE_*` parameters are ignored");

            return Ok(DatabaseConfig {
                url: Some(url),
                max_connections,
                connect_timeout_secs,
                ..defaults
            });
        }

        Ok(DatabaseConfig {
            url: None,
            host: env_or("DATABASE_HOST", defaults.host),
            port: env_or("DATABASE_PORT", defaults.port),
            user: env_or("DATABASE_USER", defaults.user),
            password: env_opt("DATABASE_PASSWORD").unwrap_or(defaults.password),
            name: env_or("DATABASE_NAME", defaults.name),
            max_connections,
            connect_timeout_secs,
        })
    }
}

/// Session option pinning `TimeZone` to UTC, so `CURRENT_TIMESTAMP` in a
/// `timestamp` column is UTC like the in-memory store's `creado_en`.
const UTC_SESSION: &str = "-c TimeZone=UTC";

impl DatabaseConfig {
    /// Connection URL with user and password percent-encoded and the session
    /// time zone set to UTC. A `DATABASE_URL` that already carries `options`
    /// is used unchanged.
    pub fn connection_url(&self) -> anyhow::Result<String> {
        if let Some(raw) = &self.url {
            let Ok(mut url) = Url::parse(raw) else {
                return Ok(raw.clone());
            };
            if url.query_pairs().any(|(key, _)| key == "options") {
                return Ok(raw.clone());
            }

            url.query_pairs_mut().append_pair("options", UTC_SESSION);

            return Ok(url.to_string());
        }

        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .with_context(|| format!("invalid database host `{}:{}`", self.host, self.port))?;

        url.set_username(&self.user)
            .map_err(|()| anyhow!("cannot use `{}` as database user", self.user))?;
        url.set_password(Some(&self.password))
            .map_err(|()| anyhow!("cannot set database password"))?;
        url.set_path(&self.name);
        url.query_pairs_mut().append_pair("options", UTC_SESSION);

        Ok(url.to_string())
    }

    /// `host:port/name` for log lines; never includes credentials.
    pub fn target(&self) -> String {
        match self.url.as_deref().map(Url::parse) {
            Some(Ok(url)) => format!(
                "{}:{}{}",
                url.host_str().unwrap_or_default(),
                url.port().unwrap_or(5432),
                url.path()
            ),
            Some(Err(_)) => "DATABASE_URL".into(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.target())
            .field("user", &self.user)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}
