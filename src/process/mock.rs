use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::process::{Invocation, ProcessOutcome, ProcessRunner};

type Effect = Box<dyn Fn(&Invocation) -> std::io::Result<()> + Send + Sync>;

/// Mock runner for testing without gradle or maven installed
///
/// Programs are matched by file name, so `/ws/gradlew` and `gradlew` are the
/// same program. Unscripted programs exit 0.
pub struct MockRunner {
    invocations: Mutex<Vec<Invocation>>,
    exit_codes: HashMap<String, i32>,
    effects: HashMap<String, Effect>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner {
            invocations: Mutex::new(Vec::new()),
            exit_codes: HashMap::new(),
            effects: HashMap::new(),
        }
    }

    /// Make every run of `program` exit with `code`
    pub fn with_exit_code(mut self, program: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(program.into(), code);
        self
    }

    /// Run `effect` whenever `program` is invoked, e.g. to drop build outputs on disk
    pub fn with_effect<F>(mut self, program: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&Invocation) -> std::io::Result<()> + Send + Sync + 'static,
    {
        self.effects.insert(program.into(), Box::new(effect));
        self
    }

    /// All invocations so far, in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Invocations of one program, matched by file name
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.program_name() == program)
            .collect()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome> {
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(invocation.clone());
        }

        let program = invocation.program_name();
        if let Some(effect) = self.effects.get(program) {
            effect(invocation)?;
        }

        let code = self.exit_codes.get(program).copied().unwrap_or(0);
        Ok(ProcessOutcome::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_invocations() {
        let runner = MockRunner::new();
        runner
            .run(&Invocation::new("/ws/gradlew", "/ws").arg("assemble"))
            .unwrap();
        runner.run(&Invocation::new("mvn", "/ws")).unwrap();

        assert_eq!(runner.invocations().len(), 2);
        assert_eq!(runner.invocations_of("gradlew")[0].args, vec!["assemble"]);
        assert_eq!(runner.invocations_of("mvn").len(), 1);
    }

    #[test]
    fn test_scripted_exit_code() {
        let runner = MockRunner::new().with_exit_code("gradlew", 1);
        let outcome = runner.run(&Invocation::new("./gradlew", ".")).unwrap();
        assert_eq!(outcome.code(), Some(1));

        let outcome = runner.run(&Invocation::new("mvn", ".")).unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn test_effect_runs_with_invocation() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = MockRunner::new().with_effect("gradle", |invocation| {
            std::fs::write(invocation.cwd.join("marker"), "")
        });

        runner.run(&Invocation::new("gradle", dir.path())).unwrap();
        assert!(dir.path().join("marker").exists());
    }
}
