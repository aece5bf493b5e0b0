use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix; `REVIVE__SYNC__DEBOUNCE_MS=400` maps to `sync.debounce_ms`.
pub const ENV_PREFIX: &str = "REVIVE";
/// File looked up (optionally) when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "revive";

#[revive_derive::revive_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// 1. **File**: an explicit `path` must exist. Without one, `revive.{toml,json,yaml}` in the
///    working directory is used when present; serde defaults fill everything else.
/// 2. **Environment**: variables prefixed with `REVIVE__`, nested with `__`.
///
/// # Errors
/// An explicit file that is missing or malformed, or values that do not fit `T`.
///
/// # Example
/// ```rust
/// use revive_kernel::config::load_config;
/// use revive_kernel::domain::config::SurfaceConfig;
///
/// let cfg: SurfaceConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.sync.debounce_ms, 250);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path
        .map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_FILE), false), |p| (p.as_ref().to_path_buf(), true));

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
