use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use frankenbisect_cli::{
    CliCommand, USAGE, default_config_file_path, emit_config_loaded, exit_code, exit_code_for,
    load_from_sources, parse_cli_args, read_line_items, write_line_items, FbisectConfig,
    ShellOracle,
};
use frankenbisect_core::tracing_config::TARGET_PREFIX;
use frankenbisect_core::{BisectResult, Bisector, TracingObserver};
use tracing::info;

fn main() {
    let cli_input = match parse_cli_args(std::env::args().skip(1)) {
        Ok(cli_input) => cli_input,
        Err(error) => {
            eprintln!("fbisect: {error}");
            eprintln!("{USAGE}");
            std::process::exit(exit_code::USAGE_ERROR);
        }
    };

    // Version and help are handled immediately, before config loading.
    match cli_input.command {
        CliCommand::Version => {
            println!("fbisect {}", env!("CARGO_PKG_VERSION"));
            std::process::exit(exit_code::OK);
        }
        CliCommand::Help => {
            println!("{USAGE}");
            std::process::exit(exit_code::OK);
        }
        CliCommand::Reduce { .. } => {}
    }

    let env_map: HashMap<String, String> = std::env::vars().collect();
    let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let config_path = cli_input
        .overrides
        .config_path
        .clone()
        .unwrap_or_else(|| default_config_file_path(&home_dir));

    if cli_input.overrides.config_path.is_some() && !config_path.exists() {
        eprintln!(
            "fbisect: explicitly provided --config path does not exist: {}",
            config_path.display()
        );
        std::process::exit(exit_code::GENERAL_ERROR);
    }

    let loaded = match load_from_sources(Some(&config_path), &env_map, &cli_input.overrides) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("fbisect: {error}");
            std::process::exit(exit_code_for(&error));
        }
    };

    init_tracing(&loaded.config.log.level);
    emit_config_loaded(&loaded);

    let CliCommand::Reduce { command, input } = cli_input.command else {
        unreachable!("version and help exit above");
    };

    match run_reduce(&command, &input, &loaded.config) {
        Ok(output_path) => {
            println!("{}", output_path.display());
        }
        Err(error) => {
            eprintln!("fbisect: {error}");
            std::process::exit(exit_code_for(&error));
        }
    }
}

fn run_reduce(
    command: &str,
    input: &std::path::Path,
    config: &FbisectConfig,
) -> BisectResult<PathBuf> {
    let items = read_line_items(input)?;
    info!(
        target: TARGET_PREFIX,
        item_count = items.len(),
        input = %input.display(),
        command,
        "starting reduction"
    );

    let mut oracle = ShellOracle::new(command)?;
    if let Some(secs) = config.oracle.timeout_secs {
        oracle = oracle.with_timeout(Duration::from_secs(secs));
    }

    let bisector = Bisector::with_config(config.bisect_config());
    let mut observer = TracingObserver;
    let reduced = bisector.run_observed(&oracle, &items, &mut observer)?;

    info!(
        target: TARGET_PREFIX,
        item_count = items.len(),
        reduced_count = reduced.len(),
        "reduction complete"
    );

    write_line_items(&reduced)
}

/// Logs go to stderr so stdout carries only the output file path.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FBISECT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
