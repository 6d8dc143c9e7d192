//! External process abstraction layer
//!
//! Gradle and Maven are driven as black boxes. Every call goes through the
//! [ProcessRunner] trait so the pipeline can be exercised without either tool
//! installed.
//!
//! - [system::SystemRunner]: spawns real processes and waits for them
//! - [mock::MockRunner]: records invocations and replays scripted exit codes

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A single external command: program, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// File name of the program (`gradlew` for `/ws/gradlew`)
    pub fn program_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.program)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How an external process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    code: Option<i32>,
}

impl ProcessOutcome {
    pub fn from_code(code: i32) -> Self {
        ProcessOutcome { code: Some(code) }
    }

    /// Terminated by a signal, no exit code
    pub fn signalled() -> Self {
        ProcessOutcome { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Runs external commands to completion.
///
/// Implementations block until the process exits. There is no timeout; a hung
/// tool hangs the caller.
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation and report how it finished.
    ///
    /// # Returns
    /// * `Ok(ProcessOutcome)` - The process ran, successfully or not
    /// * `Err` - The process could not be started at all
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome>;
}
