use std::{fmt::Display, str::FromStr};

use anyhow::Result;

/// Trait for building configuration structs
///
/// Implementors read from environment variables (or any other source) and
/// construct the configuration once at startup. The resulting value is
/// passed down explicitly; nothing is cached globally.
pub trait ConfigBuilder: Clone + Send + Sync + 'static {
    /// Build the configuration instance
    fn build() -> Result<Self>;
}

/// Reads `key` from the environment, falling back to `default` when the
/// variable is unset or cannot be parsed.
pub fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: std::fmt::Debug,
{
    let Ok(raw) = std::env::var(key) else {
        tracing::warn!("cannot read `{}` defaulting to `{}`", key, default);

        return default;
    };

    raw.parse().unwrap_or_else(|err| {
        tracing::error!("cannot parse `{}`. defaulting to {} {:?}", key, default, err);
        default
    })
}

/// Reads `key` from the environment, `None` when unset or empty.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
