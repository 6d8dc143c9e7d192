use std::process::Command;

use tracing::debug;

use crate::error::Result;
use crate::process::{Invocation, ProcessOutcome, ProcessRunner};

/// Runs commands on the host with inherited stdio so tool output streams live
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome> {
        debug!(
            program = %invocation.program,
            args = ?invocation.args,
            cwd = %invocation.cwd.display(),
            "spawning process"
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()?;

        let outcome = match status.code() {
            Some(code) => ProcessOutcome::from_code(code),
            None => ProcessOutcome::signalled(),
        };

        debug!(program = %invocation.program, %outcome, "process finished");
        Ok(outcome)
    }
}
