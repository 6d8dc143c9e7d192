use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{MvnPublishError, Result};

/// Colon-separated path to a Gradle module, e.g. `lib:dfu`
///
/// A bare `:` addresses the root project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(MvnPublishError::configuration(
                "Error: Module is required, eg; app or lib:dfu",
            ));
        }

        if raw == ":" {
            return Ok(Self::root());
        }

        // Gradle's absolute form `:library` is accepted
        let path = raw.strip_prefix(':').unwrap_or(raw);
        let segments: Vec<String> = path.split(':').map(str::to_string).collect();

        if segments.iter().any(String::is_empty) {
            return Err(MvnPublishError::configuration(format!(
                "Error: Invalid module '{}', eg; app or lib:dfu",
                raw
            )));
        }

        Ok(ModulePath { segments })
    }

    pub fn root() -> Self {
        ModulePath {
            segments: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last path segment, if any (`dfu` for `lib:dfu`)
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Gradle task path scoped to this module (`lib:dfu:assemble`)
    pub fn task(&self, task: &str) -> String {
        if self.is_root() {
            task.to_string()
        } else {
            format!("{}:{}", self.segments.join(":"), task)
        }
    }

    /// Directory of the module inside a checked-out project
    pub fn directory(&self, project_root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(project_root.to_path_buf(), |dir, segment| dir.join(segment))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, ":")
        } else {
            write!(f, "{}", self.segments.join(":"))
        }
    }
}
