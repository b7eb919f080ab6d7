use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix; `TOGGLE__STORE__DATA_DIR` maps to `store.data_dir`.
pub const ENV_PREFIX: &str = "TOGGLE";
/// File stem probed when no explicit path is given (`toggle.toml`, `toggle.yaml`, ...).
pub const DEFAULT_CONFIG_STEM: &str = "toggle";

/// Custom error type for config loading.
#[toggle_derive::toggle_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: an explicit `path` must exist. Without one, `toggle.{toml,yaml,json}` in the
///    working directory is used when present and skipped otherwise.
/// 2. **Environment Overrides**: variables prefixed with `TOGGLE__`, nested with double
///    underscores (e.g., `TOGGLE__LOG__LEVEL` maps to `log.level`).
///
/// Anything neither layer sets falls back to the target type's serde defaults.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged values do not match the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_STEM), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
