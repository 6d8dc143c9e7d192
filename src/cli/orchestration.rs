//! Main workflow orchestration logic
//!
//! Turns the raw command-line values into a [PublishJob] and drives the
//! pipeline. Kept separate from clap so the workflow can be called
//! programmatically and tested with mock collaborators.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::domain::{ArtifactCoordinates, ModulePath, PublishJob, Reference, SourceLocation};
use crate::error::{MvnPublishError, Result};
use crate::git::VersionControl;
use crate::pipeline::{bootstrap, builder, publisher, Pipeline};
use crate::process::{Invocation, ProcessRunner};
use crate::ui;

/// Arguments for the publish workflow
///
/// Mirrors the CLI flags. Empty strings and `None` are treated the same.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishWorkflowArgs {
    pub url: String,
    pub tag: Option<String>,
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub module: String,

    /// Artifact version, replacing the one derived from the reference
    pub version: Option<String>,
    pub group: Option<String>,
    pub artifact: Option<String>,
    pub gradle_version: Option<String>,

    pub repository_id: Option<String>,
    pub repository_url: Option<String>,
    pub keep_workspace: bool,

    /// Resolve and print the plan without touching disk or network
    pub dry_run: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub coordinates: ArtifactCoordinates,
    pub repository_url: String,
    /// Deployed artifact, `None` for a dry run
    pub artifact: Option<PathBuf>,
    pub bootstrapped: bool,
    pub published: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Resolve the command-line values into a job.
///
/// Pure: fails with a configuration or missing-reference error before any
/// filesystem or network access.
pub fn resolve_job(args: &PublishWorkflowArgs) -> Result<PublishJob> {
    if args.url.is_empty() {
        return Err(MvnPublishError::configuration("Error: URL is required."));
    }

    let module = ModulePath::parse(&args.module)?;
    let source = SourceLocation::from_url(&args.url)?;
    let reference = Reference::select(
        args.tag.as_deref(),
        args.branch.as_deref(),
        args.commit.as_deref(),
    )?;

    let coordinates = ArtifactCoordinates::new(
        non_empty(&args.group)
            .map(str::to_string)
            .unwrap_or_else(|| source.default_group_id()),
        non_empty(&args.artifact)
            .map(str::to_string)
            .unwrap_or_else(|| source.default_artifact_id()),
        non_empty(&args.version).unwrap_or(reference.version()),
    );
    coordinates.validate()?;

    debug!(%coordinates, %reference, %module, "job resolved");

    Ok(PublishJob {
        url: args.url.clone(),
        source,
        reference,
        module,
        coordinates,
        gradle_version: non_empty(&args.gradle_version).map(str::to_string),
    })
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, args: &PublishWorkflowArgs) {
    if let Some(id) = non_empty(&args.repository_id) {
        config.repository.id = id.to_string();
    }
    if let Some(url) = non_empty(&args.repository_url) {
        config.repository.url = url.to_string();
    }
    if args.keep_workspace {
        config.behavior.keep_workspace = true;
    }
}

/// External commands a run would execute, in order.
pub fn planned_commands(job: &PublishJob, config: &Config, workspace: &Path) -> Vec<Invocation> {
    let mut commands = Vec::new();
    let packaging = &config.repository.packaging;

    if let Some(version) = &job.gradle_version {
        commands.push(bootstrap::wrapper_invocation(
            &config.tools,
            version,
            &workspace.join(bootstrap::WRAPPER_TEMP_DIR),
        ));
    }

    commands.push(builder::assemble_invocation(
        workspace,
        &job.module,
        &config.tools,
    ));

    let expected = builder::outputs_dir(workspace, &job.module, packaging).join(format!(
        "{}-release.{}",
        job.module.leaf().unwrap_or(job.repo_name()),
        packaging
    ));
    commands.push(publisher::deploy_invocation(
        &job.coordinates,
        &expected,
        &config.repository,
        &config.tools,
        workspace,
    ));

    commands
}

/// Main publish workflow
///
/// 1. Resolve the job from the arguments
/// 2. Announce the coordinates and target repository
/// 3. Prepare the workspace, optionally bootstrap the wrapper, build, deploy
pub fn run_publish_workflow(
    args: PublishWorkflowArgs,
    mut config: Config,
    vcs: &dyn VersionControl,
    runner: &dyn ProcessRunner,
) -> Result<WorkflowResult> {
    apply_overrides(&mut config, &args);
    let job = resolve_job(&args)?;

    ui::display_publishing(&job.coordinates, &config.repository.url);

    let pipeline = Pipeline::new(&config, vcs, runner);

    if args.dry_run {
        let workspace = pipeline.preparer().workspace_path(&job)?;
        let commands = planned_commands(&job, &config, &workspace);
        ui::display_plan(&job, &workspace, &commands);

        return Ok(WorkflowResult {
            coordinates: job.coordinates,
            repository_url: config.repository.url.clone(),
            artifact: None,
            bootstrapped: false,
            published: false,
        });
    }

    let report = pipeline.run(&job)?;

    Ok(WorkflowResult {
        coordinates: report.coordinates,
        repository_url: config.repository.url.clone(),
        artifact: Some(report.artifact),
        bootstrapped: report.bootstrapped,
        published: true,
    })
}
