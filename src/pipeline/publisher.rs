use std::path::Path;

use tracing::debug;

use crate::config::{RepositoryConfig, ToolsConfig};
use crate::domain::ArtifactCoordinates;
use crate::error::{MvnPublishError, Result};
use crate::process::{Invocation, ProcessRunner};
use crate::ui;

/// `mvn deploy:deploy-file` invocation uploading `artifact` under `coordinates`
pub fn deploy_invocation(
    coordinates: &ArtifactCoordinates,
    artifact: &Path,
    repository: &RepositoryConfig,
    tools: &ToolsConfig,
    cwd: &Path,
) -> Invocation {
    Invocation::new(tools.maven.as_str(), cwd).args([
        "--batch-mode".to_string(),
        "deploy:deploy-file".to_string(),
        format!("-DgroupId={}", coordinates.group_id),
        format!("-DartifactId={}", coordinates.artifact_id),
        format!("-Dversion={}", coordinates.version),
        format!("-Dpackaging={}", repository.packaging),
        format!("-Dfile={}", artifact.display()),
        format!("-DrepositoryId={}", repository.id),
        format!("-Durl={}", repository.url),
    ])
}

/// Upload the artifact once. There is no retry.
pub fn deploy(
    coordinates: &ArtifactCoordinates,
    artifact: &Path,
    repository: &RepositoryConfig,
    tools: &ToolsConfig,
    cwd: &Path,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    let invocation = deploy_invocation(coordinates, artifact, repository, tools, cwd);
    ui::display_status(&format!("Deploying {}", coordinates));
    debug!(artifact = %artifact.display(), url = %repository.url, "deploying");

    let outcome = runner.run(&invocation).map_err(|e| {
        MvnPublishError::publish(format!("Cannot run '{}': {}", invocation.program, e))
    })?;

    if !outcome.success() {
        return Err(MvnPublishError::publish(format!(
            "{} to {} failed with {}",
            coordinates, repository.url, outcome
        )));
    }

    Ok(())
}
