//! Layered configuration for the fbisect binary.
//!
//! Precedence is `CLI > env > file > defaults`. The file layer is a TOML
//! document deserialized into patch structs (every field optional) and
//! overlaid onto the defaults; environment variables and CLI flags are then
//! applied on top in that order.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use frankenbisect_core::tracing_config::parse_level;
use frankenbisect_core::{BisectConfig, BisectError, BisectResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::CliOverrides;

const PRECEDENCE: [ConfigSource; 4] = [
    ConfigSource::Cli,
    ConfigSource::Env,
    ConfigSource::File,
    ConfigSource::Defaults,
];

const ENV_TIMEOUT_SECS: &str = "FBISECT_TIMEOUT_SECS";
const ENV_VALIDATE: &str = "FBISECT_VALIDATE";
const ENV_REVERIFY: &str = "FBISECT_REVERIFY";
const ENV_LOG_LEVEL: &str = "FBISECT_LOG_LEVEL";

/// Where a resolved config value came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Cli,
    Env,
    File,
    Defaults,
}

/// `[oracle]` section: external-command invocation policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OracleConfig {
    /// Wall-clock budget per invocation, in seconds. `None` means no limit;
    /// a killed invocation is a terminal error, never a verdict.
    pub timeout_secs: Option<u64>,
}

/// `[reduce]` section: driver behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Check the full/empty boundary behavior before reducing.
    pub validate_preconditions: bool,
    /// Re-run the oracle on the final result as a stability check.
    pub reverify_result: bool,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            validate_preconditions: true,
            reverify_result: false,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level for stderr logging: trace|debug|info|warn|error.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Resolved fbisect configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FbisectConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub reduce: ReduceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl FbisectConfig {
    /// Project the driver-relevant settings into the core config type.
    #[must_use]
    pub const fn bisect_config(&self) -> BisectConfig {
        BisectConfig {
            validate_preconditions: self.reduce.validate_preconditions,
            reverify_result: self.reduce.reverify_result,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
struct OracleConfigPatch {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
struct ReduceConfigPatch {
    validate_preconditions: Option<bool>,
    reverify_result: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
struct LogConfigPatch {
    level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
struct FbisectConfigPatch {
    oracle: Option<OracleConfigPatch>,
    reduce: Option<ReduceConfigPatch>,
    log: Option<LogConfigPatch>,
}

/// Outcome of config resolution, with provenance for the loaded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoadResult {
    pub config: FbisectConfig,
    pub source_precedence: [ConfigSource; 4],
    pub config_file_used: Option<PathBuf>,
    pub cli_flags_used: Vec<String>,
    pub env_keys_used: Vec<String>,
}

/// Default config file location (`$XDG_CONFIG_HOME` aware).
#[must_use]
pub fn default_config_file_path(home_dir: &Path) -> PathBuf {
    if let Some(xdg_config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home)
            .join("fbisect")
            .join("config.toml");
    }

    home_dir.join(".config").join("fbisect").join("config.toml")
}

/// Load config from file/env/CLI overlays using the fbisect precedence
/// contract.
///
/// # Errors
///
/// Returns `BisectError::InvalidConfig` for parse/validation failures and
/// `BisectError::Io` if reading a present file fails.
pub fn load_from_sources(
    config_file: Option<&Path>,
    env: &HashMap<String, String>,
    cli: &CliOverrides,
) -> BisectResult<ConfigLoadResult> {
    let (toml_contents, config_file_used) = match config_file {
        Some(path) if path.exists() => (Some(fs::read_to_string(path)?), Some(path.to_path_buf())),
        Some(_) | None => (None, None),
    };

    load_from_str(toml_contents.as_deref(), config_file_used.as_deref(), env, cli)
}

/// Load config from raw TOML/env/CLI overlays (`CLI > env > file >
/// defaults`).
///
/// # Errors
///
/// Returns `BisectError::InvalidConfig` when parsing/validation fails.
pub fn load_from_str(
    config_toml: Option<&str>,
    config_file_path: Option<&Path>,
    env: &HashMap<String, String>,
    cli: &CliOverrides,
) -> BisectResult<ConfigLoadResult> {
    let mut config = FbisectConfig::default();

    if let Some(config_toml) = config_toml {
        let patch: FbisectConfigPatch =
            toml::from_str(config_toml).map_err(|error| BisectError::InvalidConfig {
                field: "config_file".into(),
                value: "<toml>".into(),
                reason: error.to_string(),
            })?;
        apply_patch(&mut config, patch);
    }

    let env_keys_used = apply_env_overrides(&mut config, env)?;
    apply_cli_overrides(&mut config, cli);
    validate_config(&config)?;

    Ok(ConfigLoadResult {
        config,
        source_precedence: PRECEDENCE,
        config_file_used: config_file_path.map(Path::to_path_buf),
        cli_flags_used: cli.used_flags(),
        env_keys_used,
    })
}

/// Emit the `config_loaded` tracing event.
pub fn emit_config_loaded(result: &ConfigLoadResult) {
    info!(
        event = "config_loaded",
        precedence = ?result.source_precedence,
        config_file_used = ?result.config_file_used,
        cli_flags_used = ?result.cli_flags_used,
        env_keys_used = ?result.env_keys_used,
        "fbisect configuration loaded"
    );
}

fn apply_patch(config: &mut FbisectConfig, patch: FbisectConfigPatch) {
    if let Some(oracle) = patch.oracle {
        if let Some(timeout_secs) = oracle.timeout_secs {
            config.oracle.timeout_secs = Some(timeout_secs);
        }
    }

    if let Some(reduce) = patch.reduce {
        if let Some(validate_preconditions) = reduce.validate_preconditions {
            config.reduce.validate_preconditions = validate_preconditions;
        }
        if let Some(reverify_result) = reduce.reverify_result {
            config.reduce.reverify_result = reverify_result;
        }
    }

    if let Some(log) = patch.log {
        if let Some(level) = log.level {
            config.log.level = level;
        }
    }
}

fn apply_env_overrides(
    config: &mut FbisectConfig,
    env: &HashMap<String, String>,
) -> BisectResult<Vec<String>> {
    let mut keys_used = Vec::new();

    if let Some(raw) = env.get(ENV_TIMEOUT_SECS) {
        let secs = raw
            .parse::<u64>()
            .map_err(|_| BisectError::InvalidConfig {
                field: ENV_TIMEOUT_SECS.into(),
                value: raw.clone(),
                reason: "expected an integer number of seconds".into(),
            })?;
        config.oracle.timeout_secs = Some(secs);
        keys_used.push(ENV_TIMEOUT_SECS.into());
    }

    if let Some(raw) = env.get(ENV_VALIDATE) {
        config.reduce.validate_preconditions = parse_bool(ENV_VALIDATE, raw)?;
        keys_used.push(ENV_VALIDATE.into());
    }

    if let Some(raw) = env.get(ENV_REVERIFY) {
        config.reduce.reverify_result = parse_bool(ENV_REVERIFY, raw)?;
        keys_used.push(ENV_REVERIFY.into());
    }

    if let Some(raw) = env.get(ENV_LOG_LEVEL) {
        config.log.level = raw.clone();
        keys_used.push(ENV_LOG_LEVEL.into());
    }

    Ok(keys_used)
}

fn apply_cli_overrides(config: &mut FbisectConfig, cli: &CliOverrides) {
    if let Some(timeout_secs) = cli.timeout_secs {
        config.oracle.timeout_secs = Some(timeout_secs);
    }
    if let Some(validate_preconditions) = cli.validate_preconditions {
        config.reduce.validate_preconditions = validate_preconditions;
    }
    if let Some(reverify_result) = cli.reverify_result {
        config.reduce.reverify_result = reverify_result;
    }
    if let Some(ref log_level) = cli.log_level {
        config.log.level = log_level.clone();
    }
}

fn parse_bool(field: &str, raw: &str) -> BisectResult<bool> {
    match raw {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(BisectError::InvalidConfig {
            field: field.into(),
            value: raw.into(),
            reason: "expected true/false".into(),
        }),
    }
}

fn validate_config(config: &FbisectConfig) -> BisectResult<()> {
    if config.oracle.timeout_secs == Some(0) {
        return Err(BisectError::InvalidConfig {
            field: "oracle.timeout_secs".into(),
            value: "0".into(),
            reason: "a zero budget would kill every invocation; omit it for no limit".into(),
        });
    }

    if parse_level(&config.log.level).is_none() {
        return Err(BisectError::InvalidConfig {
            field: "log.level".into(),
            value: config.log.level.clone(),
            reason: "expected trace|debug|info|warn|error".into(),
        });
    }

    Ok(())
}
