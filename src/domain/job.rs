use crate::domain::{ArtifactCoordinates, ModulePath, Reference, SourceLocation};

/// Everything needed to publish one artifact, fixed once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishJob {
    pub url: String,
    pub source: SourceLocation,
    pub reference: Reference,
    pub module: ModulePath,
    pub coordinates: ArtifactCoordinates,
    /// Gradle version to bootstrap a wrapper for, if any
    pub gradle_version: Option<String>,
}

impl PublishJob {
    pub fn checkout_target(&self) -> String {
        self.reference.checkout_target()
    }

    pub fn repo_name(&self) -> &str {
        &self.source.repo_name
    }

    pub fn needs_bootstrap(&self) -> bool {
        self.gradle_version.is_some()
    }
}
