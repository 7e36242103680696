//! Command-line parsing for the fbisect binary.
//!
//! Parsing is hand-rolled: the surface is two positionals and a handful of
//! flags, and keeping it dependency-free keeps startup trivial. Flags may
//! appear before, between, or after the positionals.

use std::path::PathBuf;

use frankenbisect_core::{BisectError, BisectResult};

/// Usage text printed on `--help` and usage errors.
pub const USAGE: &str = "\
usage: fbisect [flags] <command> <input-file>

Reduce <input-file> to a minimal set of lines for which <command> still
fails. <command> is invoked with a temp file path appended to its argument
list; exit code 0 means the failure did not reproduce, nonzero means it
did. The reduced lines are written to a new temp file whose path is
printed on stdout.

flags:
  --timeout-secs <n>   kill an oracle invocation after <n> seconds (error,
                       not a verdict)
  --no-validate        skip the full/empty precondition checks
  --reverify           re-run the command on the final result and fail if
                       it no longer reproduces
  --log-level <level>  trace|debug|info|warn|error (default: info)
  --config <path>      TOML config file (default: ~/.config/fbisect/config.toml)
  -V, --version        print version and exit
  -h, --help           print this help and exit";

/// Process exit codes for the fbisect binary.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const USAGE_ERROR: i32 = 2;
    pub const PRECONDITION_VIOLATION: i32 = 3;
    pub const ORACLE_ERROR: i32 = 4;
}

/// Map an error to the exit code the process should report.
#[must_use]
pub fn exit_code_for(error: &BisectError) -> i32 {
    match error {
        BisectError::FullInputSucceeded
        | BisectError::EmptyInputFailed
        | BisectError::UnstableResult { .. } => exit_code::PRECONDITION_VIOLATION,
        BisectError::OracleFailure { .. }
        | BisectError::OracleSpawn { .. }
        | BisectError::OracleTimeout { .. } => exit_code::ORACLE_ERROR,
        BisectError::Usage(_) => exit_code::USAGE_ERROR,
        BisectError::Io(_) | BisectError::InvalidConfig { .. } => exit_code::GENERAL_ERROR,
    }
}

/// The action selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run a reduction: oracle command string plus input file path.
    Reduce { command: String, input: PathBuf },
    Version,
    Help,
}

/// Flag values that override config-file and environment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub timeout_secs: Option<u64>,
    pub validate_preconditions: Option<bool>,
    pub reverify_result: Option<bool>,
    pub log_level: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl CliOverrides {
    /// Flag names present on this invocation, for the `config_loaded` event.
    #[must_use]
    pub fn used_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.timeout_secs.is_some() {
            flags.push("--timeout-secs".into());
        }
        if self.validate_preconditions.is_some() {
            flags.push("--no-validate".into());
        }
        if self.reverify_result.is_some() {
            flags.push("--reverify".into());
        }
        if self.log_level.is_some() {
            flags.push("--log-level".into());
        }
        if self.config_path.is_some() {
            flags.push("--config".into());
        }
        flags
    }
}

/// Fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInput {
    pub command: CliCommand,
    pub overrides: CliOverrides,
}

/// Parse the argument list (without the program name).
///
/// # Errors
///
/// Returns [`BisectError::Usage`] for unknown flags, missing flag values,
/// missing positionals, or excess positionals.
pub fn parse_cli_args<I>(args: I) -> BisectResult<CliInput>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut positionals: Vec<String> = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--timeout-secs" => {
                let value = flag_value(&arg, args.next())?;
                let secs = value.parse::<u64>().map_err(|_| {
                    BisectError::Usage(format!("--timeout-secs expects an integer, got {value:?}"))
                })?;
                overrides.timeout_secs = Some(secs);
            }
            "--no-validate" => overrides.validate_preconditions = Some(false),
            "--reverify" => overrides.reverify_result = Some(true),
            "--log-level" => {
                overrides.log_level = Some(flag_value(&arg, args.next())?);
            }
            "--config" => {
                overrides.config_path = Some(PathBuf::from(flag_value(&arg, args.next())?));
            }
            "--version" | "-V" => {
                return Ok(CliInput {
                    command: CliCommand::Version,
                    overrides,
                });
            }
            "--help" | "-h" => {
                return Ok(CliInput {
                    command: CliCommand::Help,
                    overrides,
                });
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(BisectError::Usage(format!("unknown flag {flag:?}")));
            }
            _ => positionals.push(arg),
        }
    }

    match positionals.len() {
        2 => {
            let input = PathBuf::from(positionals.pop().unwrap_or_default());
            let command = positionals.pop().unwrap_or_default();
            Ok(CliInput {
                command: CliCommand::Reduce { command, input },
                overrides,
            })
        }
        0 | 1 => Err(BisectError::Usage(
            "expected <command> and <input-file>".into(),
        )),
        extra => Err(BisectError::Usage(format!(
            "expected exactly 2 positional arguments, got {extra}"
        ))),
    }
}

fn flag_value(flag: &str, value: Option<String>) -> BisectResult<String> {
    value.ok_or_else(|| BisectError::Usage(format!("{flag} requires a value")))
}
