use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ToolsConfig;
use crate::domain::ModulePath;
use crate::error::{MvnPublishError, Result};
use crate::pipeline::workspace::{absolute, Workspace};
use crate::process::{Invocation, ProcessRunner};
use crate::ui;

pub const ASSEMBLE_TASK: &str = "assemble";

/// Shown when the build fails; a toolchain mismatch is by far the usual cause.
pub const BUILD_FAILURE_HINT: &str = "Gradle build failed. If you are publishing an old library, \
you might need to change your Java version or Gradle version. To change your java version, use \
sdkman: https://sdkman.io/. To change your gradle wrapper version, provide the --gradle-version \
flag (i.e --gradle-version 6.5). See https://developer.android.com/studio/releases/gradle-plugin \
for finding the correct gradle version that matches with the project's Android build tools version.";

/// Command assembling `module` with the project's wrapper
pub fn assemble_invocation(workspace: &Path, module: &ModulePath, tools: &ToolsConfig) -> Invocation {
    let wrapper = workspace.join(&tools.wrapper);
    Invocation::new(wrapper.to_string_lossy(), workspace).arg(module.task(ASSEMBLE_TASK))
}

/// Where Gradle leaves outputs of the given packaging for a module
pub fn outputs_dir(workspace: &Path, module: &ModulePath, packaging: &str) -> PathBuf {
    module
        .directory(workspace)
        .join("build")
        .join("outputs")
        .join(packaging)
}

/// Assemble the module and return the absolute path of the produced artifact.
pub fn assemble(
    workspace: &Workspace,
    module: &ModulePath,
    packaging: &str,
    tools: &ToolsConfig,
    runner: &dyn ProcessRunner,
) -> Result<PathBuf> {
    let root = absolute(workspace.path())?;
    let invocation = assemble_invocation(&root, module, tools);
    ui::display_status(&format!("Building {}", module.task(ASSEMBLE_TASK)));

    let outcome = runner.run(&invocation).map_err(|e| {
        MvnPublishError::build(format!(
            "Cannot run '{}': {}. {}",
            invocation.program, e, BUILD_FAILURE_HINT
        ))
    })?;

    if !outcome.success() {
        warn!(%outcome, "gradle build failed");
        return Err(MvnPublishError::build(BUILD_FAILURE_HINT));
    }

    let artifact = locate_artifact(&outputs_dir(&root, module, packaging), packaging)?;
    debug!(artifact = %artifact.display(), "artifact produced");
    Ok(artifact)
}

/// Pick the built artifact, preferring the release variant.
pub fn locate_artifact(dir: &Path, packaging: &str) -> Result<PathBuf> {
    let missing = || {
        MvnPublishError::build(format!(
            "Gradle build succeeded but no .{} artifact was found in {}",
            packaging,
            dir.display()
        ))
    };

    let entries = fs::read_dir(dir).map_err(|_| missing())?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(packaging))
        .collect();
    candidates.sort();

    let release_suffix = format!("-release.{}", packaging);
    let chosen = candidates
        .iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(&release_suffix))
        })
        .or_else(|| candidates.first())
        .ok_or_else(missing)?;

    Ok(fs::canonicalize(chosen)?)
}
