//! Gradle wrapper bootstrapping
//!
//! Old projects often pin a wrapper version that no longer works with the local
//! toolchain. Generating a wrapper inside the project fails when the project's
//! own build is broken, so the wrapper is generated in an empty sibling project
//! and its files are copied over the project's wrapper.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::ToolsConfig;
use crate::error::{MvnPublishError, Result};
use crate::pipeline::workspace::Workspace;
use crate::process::{Invocation, ProcessRunner};
use crate::ui;

/// Scratch project the wrapper is generated in, relative to the workspace
pub const WRAPPER_TEMP_DIR: &str = "gradle-tmp";

pub const SETTINGS_FILE: &str = "settings.gradle";
const SETTINGS_FILE_KTS: &str = "settings.gradle.kts";

/// Launcher scripts the project keeps; only the wrapper jar and properties are replaced
const LAUNCHERS: [&str; 2] = ["gradlew", "gradlew.bat"];

/// Command generating a wrapper for `gradle_version` in `dir`
pub fn wrapper_invocation(tools: &ToolsConfig, gradle_version: &str, dir: &Path) -> Invocation {
    Invocation::new(tools.gradle.as_str(), dir).args([
        "wrapper",
        "--gradle-version",
        gradle_version,
        "--distribution-type",
        "all",
    ])
}

/// Replace the workspace's wrapper with one for `gradle_version`.
pub fn bootstrap_wrapper(
    workspace: &Workspace,
    gradle_version: &str,
    tools: &ToolsConfig,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    ui::display_status(&format!("Will install gradle wrapper version {}", gradle_version));

    let root = workspace.path();
    let temp = root.join(WRAPPER_TEMP_DIR);

    fs::create_dir_all(&temp).map_err(|e| bootstrap_io("create", &temp, e))?;
    fs::write(temp.join(SETTINGS_FILE), "")
        .map_err(|e| bootstrap_io("write", &temp.join(SETTINGS_FILE), e))?;

    let invocation = wrapper_invocation(tools, gradle_version, &temp);
    let outcome = runner.run(&invocation).map_err(|e| {
        MvnPublishError::bootstrap(format!("Cannot run '{}': {}", invocation.program, e))
    })?;
    if !outcome.success() {
        return Err(MvnPublishError::bootstrap(format!(
            "'{}' failed with {}",
            invocation, outcome
        )));
    }

    for generated in std::iter::once(SETTINGS_FILE).chain(LAUNCHERS) {
        remove_if_present(&temp.join(generated))?;
    }

    copy_dir_contents(&temp, root).map_err(|e| bootstrap_io("copy", &temp, e))?;
    fs::remove_dir_all(&temp).map_err(|e| bootstrap_io("remove", &temp, e))?;

    ensure_settings_file(root)?;
    debug!(%gradle_version, "gradle wrapper replaced");
    Ok(())
}

/// Single-module projects may lack a settings file; Gradle needs one to find
/// the target module.
pub fn ensure_settings_file(root: &Path) -> Result<()> {
    if root.join(SETTINGS_FILE).exists() || root.join(SETTINGS_FILE_KTS).exists() {
        return Ok(());
    }

    let settings = root.join(SETTINGS_FILE);
    fs::write(&settings, "").map_err(|e| bootstrap_io("write", &settings, e))
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(bootstrap_io("remove", path, e)),
    }
}

/// Recursively copy everything under `from` into `to`, overwriting files.
fn copy_dir_contents(from: &Path, to: &Path) -> io::Result<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&target)?;
            copy_dir_contents(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn bootstrap_io(action: &str, path: &Path, e: io::Error) -> MvnPublishError {
    MvnPublishError::bootstrap(format!("Cannot {} {}: {}", action, path.display(), e))
}
