//! The publish pipeline
//!
//! Stages run strictly in order, each blocking on its external tool:
//!
//! `ReferenceResolved -> WorkspaceReady -> [BootstrapDone] -> Built -> Published`
//!
//! Any failure moves the job to `Failed` and stops it. Nothing is retried or
//! rolled back; the workspace handle takes care of removing the checkout.

pub mod bootstrap;
pub mod builder;
pub mod publisher;
pub mod workspace;

pub use workspace::{Workspace, WorkspacePreparer};

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error};

use crate::config::Config;
use crate::domain::{ArtifactCoordinates, PublishJob};
use crate::error::Result;
use crate::git::VersionControl;
use crate::process::ProcessRunner;

/// Where a job currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    ReferenceResolved,
    WorkspaceReady,
    BootstrapDone,
    Built,
    Published,
    Failed,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Parsing => "parsing",
            Stage::ReferenceResolved => "reference-resolved",
            Stage::WorkspaceReady => "workspace-ready",
            Stage::BootstrapDone => "bootstrap-done",
            Stage::Built => "built",
            Stage::Published => "published",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub coordinates: ArtifactCoordinates,
    /// Path the artifact was deployed from; gone once the workspace is removed
    pub artifact: PathBuf,
    pub bootstrapped: bool,
    /// Stages passed through, in order
    pub stages: Vec<Stage>,
}

/// Runs one job against injected collaborators
pub struct Pipeline<'a> {
    config: &'a Config,
    vcs: &'a dyn VersionControl,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn VersionControl,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Pipeline {
            config,
            vcs,
            runner,
        }
    }

    pub fn preparer(&self) -> WorkspacePreparer<'a> {
        WorkspacePreparer::new(
            &self.config.paths,
            self.vcs,
            self.config.behavior.keep_workspace,
        )
    }

    pub fn run(&self, job: &PublishJob) -> Result<PublishReport> {
        let mut stages = vec![Stage::ReferenceResolved];

        match self.run_stages(job, &mut stages) {
            Ok(report) => Ok(report),
            Err(e) => {
                let last = stages.last().copied().unwrap_or(Stage::Parsing);
                error!(stage = %Stage::Failed, after = %last, error = %e, "publish failed");
                Err(e)
            }
        }
    }

    fn run_stages(&self, job: &PublishJob, stages: &mut Vec<Stage>) -> Result<PublishReport> {
        let workspace = self.preparer().prepare(job)?;
        advance(stages, Stage::WorkspaceReady);

        let bootstrapped = match &job.gradle_version {
            Some(version) => {
                bootstrap::bootstrap_wrapper(&workspace, version, &self.config.tools, self.runner)?;
                advance(stages, Stage::BootstrapDone);
                true
            }
            None => false,
        };

        let artifact = builder::assemble(
            &workspace,
            &job.module,
            &self.config.repository.packaging,
            &self.config.tools,
            self.runner,
        )?;
        advance(stages, Stage::Built);

        publisher::deploy(
            &job.coordinates,
            &artifact,
            &self.config.repository,
            &self.config.tools,
            workspace.path(),
            self.runner,
        )?;
        advance(stages, Stage::Published);

        Ok(PublishReport {
            coordinates: job.coordinates.clone(),
            artifact,
            bootstrapped,
            stages: stages.clone(),
        })
    }
}

fn advance(stages: &mut Vec<Stage>, next: Stage) {
    debug!(stage = %next, "stage complete");
    stages.push(next);
}
