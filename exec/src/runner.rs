//! Running invocations.
//!
//! Every forwarded tool is started and waited on before the next one is
//! considered. The child inherits the caller's stdin, stdout and stderr.

use crate::error::{Error, Result};
use crate::invocation::Invocation;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use tracing::{debug, warn};

/// Exit status of a forwarded tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code (if exited normally)
    pub code: Option<i32>,
    /// Signal (if killed by signal)
    pub signal: Option<i32>,
}

impl ExitStatus {
    /// Status of a tool that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// Check if the process exited successfully.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            signal: status.signal(),
        }
    }
}

/// Something that can carry out an [`Invocation`].
pub trait Runner {
    /// Run the invocation to completion.
    fn run(&mut self, invocation: &Invocation) -> Result<ExitStatus>;
}

impl<R: Runner + ?Sized> Runner for Box<R> {
    fn run(&mut self, invocation: &Invocation) -> Result<ExitStatus> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<ExitStatus> {
        let mut child = invocation
            .to_command()
            .spawn()
            .map_err(|source| Error::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;

        debug!(pid = child.id(), command = %invocation, "Spawned process");

        let status = child.wait().map_err(|source| Error::Wait {
            program: invocation.program().to_string(),
            source,
        })?;

        let status = ExitStatus::from(status);
        debug!(command = %invocation, code = ?status.code, signal = ?status.signal, "Process exited");
        Ok(status)
    }
}

/// Prints invocations instead of running them.
pub struct DryRunner<W: Write> {
    out: W,
}

impl<W: Write> DryRunner<W> {
    /// Create a dry runner writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the runner, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Runner for DryRunner<W> {
    fn run(&mut self, invocation: &Invocation) -> Result<ExitStatus> {
        writeln!(self.out, "would run: {}", invocation)?;
        Ok(ExitStatus::from_code(0))
    }
}

/// Records invocations without running anything. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    failures: Vec<(String, ExitStatus)>,
    missing: Vec<String>,
}

impl RecordingRunner {
    /// Create an empty recorder where every invocation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`.
    pub fn fail(mut self, program: &str, code: i32) -> Self {
        self.failures
            .push((program.to_string(), ExitStatus::from_code(code)));
        self
    }

    /// Make every invocation of `program` fail to spawn.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Invocations seen so far, in order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Invocations as plain argument vectors.
    pub fn argvs(&self) -> Vec<Vec<&str>> {
        self.invocations.iter().map(Invocation::argv).collect()
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<ExitStatus> {
        self.invocations.push(invocation.clone());

        if self.missing.iter().any(|p| p == invocation.program()) {
            return Err(Error::Spawn {
                program: invocation.program().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        Ok(self
            .failures
            .iter()
            .find(|(p, _)| p == invocation.program())
            .map(|(_, status)| *status)
            .unwrap_or(ExitStatus::from_code(0)))
    }
}

/// Pick the runner for this process: a [`DryRunner`] on stderr, or the
/// real [`SystemRunner`].
pub fn select_runner(dry_run: bool) -> Box<dyn Runner> {
    if dry_run {
        Box::new(DryRunner::new(std::io::stderr()))
    } else {
        Box::new(SystemRunner)
    }
}

/// Collects the outcome of a series of invocations.
///
/// Failures never stop the series; they only decide the final exit code
/// when failure propagation is enabled.
#[derive(Debug, Default)]
pub struct FailureTally {
    first_failure: Option<i32>,
}

impl FailureTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `invocation` and record the outcome. Spawn errors are logged
    /// and counted as failures.
    pub fn run<R: Runner + ?Sized>(&mut self, runner: &mut R, invocation: &Invocation) {
        match runner.run(invocation) {
            Ok(status) if status.success() => {}
            Ok(status) => self.record(status.code.unwrap_or(1)),
            Err(e) => {
                warn!(error = %e, "Forwarded command failed");
                self.record(1);
            }
        }
    }

    fn record(&mut self, code: i32) {
        let code = if code == 0 { 1 } else { code };
        self.first_failure.get_or_insert(code);
    }

    /// Whether any invocation failed.
    pub fn failed(&self) -> bool {
        self.first_failure.is_some()
    }

    /// Exit code for the whole series.
    pub fn exit_code(&self, propagate: bool) -> i32 {
        match self.first_failure {
            Some(code) if propagate => code,
            _ => 0,
        }
    }
}
