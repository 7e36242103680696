//! External-command oracle adapter.
//!
//! Each evaluation materializes the candidate lines to a temp file, appends
//! that file's path to the configured command's argument list, runs the
//! command, and maps its exit status to a verdict: exit 0 means the failure
//! did not reproduce, any nonzero exit means it did.
//!
//! An invocation killed for exceeding the wall-clock budget is a terminal
//! [`BisectError::OracleTimeout`], never a failure verdict: a reduction
//! steered by timeouts would converge on whatever makes the command slow,
//! not on what makes it fail.

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use frankenbisect_core::tracing_config::TARGET_PREFIX;
use frankenbisect_core::{BisectError, BisectResult, Oracle, Verdict};
use tempfile::NamedTempFile;
use tracing::debug;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Oracle that delegates the verdict to an external command.
#[derive(Debug, Clone)]
pub struct ShellOracle {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
    display: String,
}

impl ShellOracle {
    /// Build an oracle from a command string, split on whitespace.
    ///
    /// The first token is the program, the rest are leading arguments; the
    /// candidate file path is appended as the final argument of every
    /// invocation. Commands needing shell features should be wrapped in a
    /// script (`fbisect "sh check.sh" input`).
    ///
    /// # Errors
    ///
    /// Returns `BisectError::InvalidConfig` for an empty command string.
    pub fn new(command: &str) -> BisectResult<Self> {
        let mut tokens = command.split_whitespace().map(str::to_owned);
        let Some(program) = tokens.next() else {
            return Err(BisectError::InvalidConfig {
                field: "command".into(),
                value: command.into(),
                reason: "oracle command must not be empty".into(),
            });
        };

        Ok(Self {
            program,
            args: tokens.collect(),
            timeout: None,
            display: command.trim().to_owned(),
        })
    }

    /// Apply a wall-clock budget to every invocation.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The command string this oracle runs, as configured.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.display
    }

    fn write_candidate(candidate: &[String]) -> BisectResult<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("fbisect-candidate-")
            .tempfile()?;
        for item in candidate {
            writeln!(file, "{item}")?;
        }
        file.flush()?;
        Ok(file)
    }

    fn run_command(&self, candidate_path: &Path) -> BisectResult<ExitStatus> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(candidate_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| BisectError::OracleSpawn {
                command: self.display.clone(),
                source,
            })?;

        let Some(budget) = self.timeout else {
            return Ok(child.wait()?);
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= budget {
                // Kill may race a just-exited child; reap it either way.
                let _ = child.kill();
                let _ = child.wait();
                return Err(BisectError::OracleTimeout {
                    elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    budget_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
                });
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

impl Oracle<String> for ShellOracle {
    fn evaluate(&self, candidate: &[String]) -> BisectResult<Verdict> {
        let candidate_file = Self::write_candidate(candidate)?;
        let status = self.run_command(candidate_file.path())?;
        let verdict = Verdict::from_success(status.success());
        debug!(
            target: TARGET_PREFIX,
            candidate_len = candidate.len(),
            exit = ?status.code(),
            verdict = %verdict,
            "oracle command finished"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = ShellOracle::new("   ").unwrap_err();
        assert!(matches!(err, BisectError::InvalidConfig { .. }));
    }

    #[test]
    fn command_string_is_tokenized() {
        let oracle = ShellOracle::new("grep -q needle").unwrap();
        assert_eq!(oracle.program, "grep");
        assert_eq!(oracle.args, vec!["-q", "needle"]);
        assert_eq!(oracle.command(), "grep -q needle");
    }

    #[cfg(unix)]
    #[test]
    fn exit_zero_maps_to_success() {
        let oracle = ShellOracle::new("true").unwrap();
        assert_eq!(oracle.evaluate(&[]).unwrap(), Verdict::Success);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_maps_to_failure_reproduced() {
        let oracle = ShellOracle::new("false").unwrap();
        assert_eq!(oracle.evaluate(&[]).unwrap(), Verdict::FailureReproduced);
    }

    #[cfg(unix)]
    #[test]
    fn candidate_file_carries_the_items() {
        // grep -q exits 0 when the needle is present.
        let oracle = ShellOracle::new("grep -q needle").unwrap();
        assert_eq!(
            oracle.evaluate(&lines(&["hay", "needle", "stack"])).unwrap(),
            Verdict::Success
        );
        assert_eq!(
            oracle.evaluate(&lines(&["hay", "stack"])).unwrap(),
            Verdict::FailureReproduced
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let oracle = ShellOracle::new("/nonexistent/fbisect-no-such-program").unwrap();
        let err = oracle.evaluate(&[]).unwrap_err();
        assert!(matches!(err, BisectError::OracleSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exceeding_the_budget_is_a_timeout_error() {
        // The candidate path is appended to the command, and GNU sleep
        // rejects a non-numeric trailing argument and exits immediately.
        // `tail -f` happily follows the (empty) candidate file forever, so
        // it reliably outlives the budget.
        let oracle = ShellOracle::new("tail -f /dev/null")
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        let err = oracle.evaluate(&[]).unwrap_err();
        match err {
            BisectError::OracleTimeout { budget_ms, .. } => assert_eq!(budget_ms, 100),
            other => panic!("expected OracleTimeout, got {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn fast_commands_finish_inside_a_generous_budget() {
        let oracle = ShellOracle::new("true")
            .unwrap()
            .with_timeout(Duration::from_secs(30));
        assert_eq!(oracle.evaluate(&[]).unwrap(), Verdict::Success);
    }
}
