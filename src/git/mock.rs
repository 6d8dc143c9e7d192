use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::error::{MvnPublishError, Result};
use crate::git::VersionControl;

/// Mock version control for testing without network or real repositories
///
/// Cloning creates the destination directory and writes any seeded files into
/// it. Checkout succeeds only for registered targets.
pub struct MockVersionControl {
    targets: HashSet<String>,
    files: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockVersionControl {
    pub fn new() -> Self {
        MockVersionControl {
            targets: HashSet::new(),
            files: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register a checkout target that exists in the "remote"
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.insert(target.into());
        self
    }

    /// Seed a file, relative to the clone root, written on every clone
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Operations performed so far, e.g. `clone <url>`, `fetch`, `checkout tags/1.0`
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockVersionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockVersionControl {
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()> {
        self.record(format!("clone {}", url));

        if destination.exists() {
            return Err(MvnPublishError::Git(git2::Error::from_str(&format!(
                "destination path '{}' already exists",
                destination.display()
            ))));
        }

        fs::create_dir_all(destination)?;
        for (path, contents) in &self.files {
            let file = destination.join(path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, contents)?;
        }

        Ok(())
    }

    fn fetch_all(&self, _workdir: &Path) -> Result<()> {
        self.record("fetch".to_string());
        Ok(())
    }

    fn checkout(&self, _workdir: &Path, target: &str) -> Result<()> {
        self.record(format!("checkout {}", target));

        if self.targets.contains(target) {
            Ok(())
        } else {
            Err(MvnPublishError::checkout(format!(
                "'{}' does not exist in the remote",
                target
            )))
        }
    }
}
