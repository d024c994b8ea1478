//! # oplog-config
//!
//! Configuration schema, env overrides, and loading for the `oplog` logging
//! facade. This crate depends on `shared` only.
//!
//! The configuration value is constructed explicitly and injected into the
//! facade; nothing in this crate reads process state except the opt-in
//! `from_std_env`/`load_logger_config_std_env` entry points.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (defaults + file + env).
pub mod load;
/// Configuration schema types and defaults.
pub mod schema;

pub use env::{
    ENV_CLOUD_CREDENTIALS, ENV_CLOUD_ENDPOINT, ENV_CLOUD_PROJECT_ID, ENV_CLOUD_SEVERITY,
    ENV_CONTEXT_FIELD_NAME, ENV_USE_CLOUD, EnvParseError, LoggerEnv, apply_env_overrides,
};
pub use load::{load_logger_config, load_logger_config_std_env};
pub use schema::{CloudConfig, DEFAULT_CLOUD_SEVERITY, DEFAULT_CONTEXT_FIELD, LoggerConfig};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
