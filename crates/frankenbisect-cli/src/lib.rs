//! fbisect binary surface.
//!
//! This crate establishes the standalone fbisect binary with explicit
//! separation between reusable config/adapter logic and the process
//! entrypoint:
//!
//! - **cli**: hand-rolled argument parsing, usage text, exit codes
//! - **config**: layered configuration (`CLI > env > file > defaults`)
//! - **items**: line-item file I/O (input reading, reduced-output writing)
//! - **shell_oracle**: external-command oracle adapter (temp file, exit
//!   code mapping, optional wall-clock timeout)

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod items;
pub mod shell_oracle;

pub use cli::{CliCommand, CliInput, CliOverrides, USAGE, exit_code, exit_code_for, parse_cli_args};
pub use config::{
    ConfigLoadResult, ConfigSource, FbisectConfig, LogConfig, OracleConfig, ReduceConfig,
    default_config_file_path, emit_config_loaded, load_from_sources, load_from_str,
};
pub use items::{read_line_items, write_line_items};
pub use shell_oracle::ShellOracle;
