//! Scratch workspace preparation
//!
//! A [Workspace] is owned by one job. It is created fresh (any stale directory
//! for the same repository name is removed first) and removed again when the
//! handle is dropped, unless the caller asked to keep it.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::PathsConfig;
use crate::domain::PublishJob;
use crate::error::{MvnPublishError, Result};
use crate::git::VersionControl;
use crate::ui;

/// Android SDK location file read by the Android Gradle plugin
pub const LOCAL_PROPERTIES: &str = "local.properties";

const DEFAULT_CREDENTIALS_NAME: &str = "keystore.properties";

/// A checked-out, credential-configured copy of the source project
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    keep: bool,
    /// (location inside the workspace, location it was moved from)
    credentials: Option<(PathBuf, PathBuf)>,
}

impl Workspace {
    /// Treat an existing directory as a workspace. It is never removed on drop.
    pub fn existing(path: impl Into<PathBuf>) -> Self {
        Workspace {
            path: path.into(),
            keep: true,
            credentials: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keeps_on_drop(&self) -> bool {
        self.keep
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.keep {
            debug!(path = %self.path.display(), "keeping workspace");
            return;
        }

        if let Some((inside, original)) = self.credentials.take() {
            if inside.exists() {
                if let Err(e) = move_file(&inside, &original) {
                    warn!(error = %e, "could not restore credentials file");
                }
            }
        }

        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "workspace removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not remove workspace"),
        }
    }
}

/// Builds a [Workspace] for a job
pub struct WorkspacePreparer<'a> {
    paths: &'a PathsConfig,
    vcs: &'a dyn VersionControl,
    keep: bool,
}

impl<'a> WorkspacePreparer<'a> {
    pub fn new(paths: &'a PathsConfig, vcs: &'a dyn VersionControl, keep: bool) -> Self {
        WorkspacePreparer { paths, vcs, keep }
    }

    /// Absolute directory the job's workspace lives in
    pub fn workspace_path(&self, job: &PublishJob) -> Result<PathBuf> {
        Ok(absolute(&self.paths.scratch_root)?.join(job.repo_name()))
    }

    /// Run every preparation step in order. Any failure aborts the job.
    pub fn prepare(&self, job: &PublishJob) -> Result<Workspace> {
        fs::create_dir_all(&self.paths.scratch_root).map_err(|e| {
            MvnPublishError::workspace(format!(
                "Cannot create scratch directory {}: {}",
                self.paths.scratch_root.display(),
                e
            ))
        })?;

        let path = self.workspace_path(job)?;
        self.remove_stale(&path)?;

        let mut workspace = Workspace {
            path,
            keep: self.keep,
            credentials: None,
        };

        ui::display_status(&format!("Cloning {}", job.url));
        self.vcs.clone_repository(&job.url, workspace.path())?;
        self.vcs.fetch_all(workspace.path())?;

        let target = job.checkout_target();
        ui::display_status(&format!("Checking out {}", target));
        self.vcs.checkout(workspace.path(), &target)?;

        workspace.credentials = Some(self.install_credentials(workspace.path())?);
        ensure_local_properties(workspace.path(), &self.paths.sdk_dir)?;

        Ok(workspace)
    }

    fn credentials_name(&self) -> PathBuf {
        self.paths
            .credentials_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_NAME))
    }

    /// Remove a workspace left behind by an earlier run. A credentials file
    /// stranded inside it is moved back first.
    fn remove_stale(&self, path: &Path) -> Result<()> {
        let stranded = path.join(self.credentials_name());
        if stranded.is_file() && !self.paths.credentials_file.exists() {
            debug!(path = %stranded.display(), "reclaiming credentials from stale workspace");
            move_file(&stranded, &self.paths.credentials_file)?;
        }

        match fs::remove_dir_all(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale workspace");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MvnPublishError::workspace(format!(
                "Cannot remove stale workspace {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn install_credentials(&self, workspace: &Path) -> Result<(PathBuf, PathBuf)> {
        let source = &self.paths.credentials_file;
        if !source.is_file() {
            return Err(MvnPublishError::workspace(format!(
                "Credentials file not found at {}",
                source.display()
            )));
        }

        let destination = workspace.join(self.credentials_name());
        move_file(source, &destination)?;
        debug!(destination = %destination.display(), "credentials installed");

        Ok((destination, source.clone()))
    }
}

/// Resolve `path` against the current directory. External tools run with the
/// workspace as their working directory, so paths handed to them are absolute.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = env::current_dir().map_err(|e| {
        MvnPublishError::workspace(format!("Cannot resolve {}: {}", path.display(), e))
    })?;
    Ok(cwd.join(path))
}

/// Write `local.properties` pointing at the SDK unless the project ships one.
pub fn ensure_local_properties(workspace: &Path, sdk_dir: &Path) -> Result<bool> {
    let file = workspace.join(LOCAL_PROPERTIES);
    if file.exists() {
        return Ok(false);
    }

    fs::write(&file, format!("sdk.dir={}\n", sdk_dir.display()))?;
    debug!(sdk_dir = %sdk_dir.display(), "wrote {}", LOCAL_PROPERTIES);
    Ok(true)
}

/// Rename, falling back to copy-and-delete across filesystems.
pub(crate) fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if fs::rename(from, to).is_err() {
        fs::copy(from, to).map_err(|e| {
            MvnPublishError::workspace(format!(
                "Cannot move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        fs::remove_file(from)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactCoordinates, ModulePath, Reference, SourceLocation};
    use crate::git::MockVersionControl;
    use serial_test::serial;
    use tempfile::TempDir;

    fn job() -> PublishJob {
        PublishJob {
            url: "https://github.com/acme/widgets".to_string(),
            source: SourceLocation {
                org_id: "acme".to_string(),
                repo_name: "widgets".to_string(),
            },
            reference: Reference::Tag("1.0.3".to_string()),
            module: ModulePath::parse("library").unwrap(),
            coordinates: ArtifactCoordinates::new("com.github.acme", "widgets", "1.0.3"),
            gradle_version: None,
        }
    }

    fn paths(root: &Path) -> PathsConfig {
        let credentials = root.join("build/keystore.properties");
        fs::create_dir_all(root.join("build")).unwrap();
        fs::write(&credentials, "storePassword=secret\n").unwrap();

        PathsConfig {
            scratch_root: root.join("build/script"),
            credentials_file: credentials,
            sdk_dir: PathBuf::from("/home/dev/Library/Android/sdk"),
        }
    }

    #[test]
    fn test_prepare_runs_steps_in_order() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let vcs = MockVersionControl::new().with_target("tags/1.0.3");

        let preparer = WorkspacePreparer::new(&paths, &vcs, false);
        let workspace = preparer.prepare(&job()).unwrap();

        assert_eq!(
            vcs.calls(),
            vec![
                "clone https://github.com/acme/widgets",
                "fetch",
                "checkout tags/1.0.3"
            ]
        );
        assert_eq!(workspace.path(), dir.path().join("build/script/widgets"));
        assert!(workspace.path().join("keystore.properties").is_file());
        assert!(!paths.credentials_file.exists());

        let local = fs::read_to_string(workspace.path().join(LOCAL_PROPERTIES)).unwrap();
        assert_eq!(local, "sdk.dir=/home/dev/Library/Android/sdk\n");
    }

    #[test]
    fn test_existing_local_properties_is_untouched() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let vcs = MockVersionControl::new()
            .with_target("tags/1.0.3")
            .with_file(LOCAL_PROPERTIES, "sdk.dir=/opt/sdk\n");

        let workspace = WorkspacePreparer::new(&paths, &vcs, false)
            .prepare(&job())
            .unwrap();

        let local = fs::read_to_string(workspace.path().join(LOCAL_PROPERTIES)).unwrap();
        assert_eq!(local, "sdk.dir=/opt/sdk\n");
    }

    #[test]
    fn test_stale_workspace_is_replaced() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let stale = paths.scratch_root.join("widgets");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("leftover.txt"), "old").unwrap();

        let vcs = MockVersionControl::new().with_target("tags/1.0.3");
        let workspace = WorkspacePreparer::new(&paths, &vcs, false)
            .prepare(&job())
            .unwrap();

        assert!(!workspace.path().join("leftover.txt").exists());
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        fs::remove_file(&paths.credentials_file).unwrap();

        let vcs = MockVersionControl::new().with_target("tags/1.0.3");
        let err = WorkspacePreparer::new(&paths, &vcs, false)
            .prepare(&job())
            .unwrap_err();

        assert!(err.to_string().contains("Credentials file not found"));
        assert!(!paths.scratch_root.join("widgets").exists());
    }

    #[test]
    fn test_unknown_target_stops_before_credentials() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let vcs = MockVersionControl::new();

        let err = WorkspacePreparer::new(&paths, &vcs, false)
            .prepare(&job())
            .unwrap_err();

        assert!(matches!(err, MvnPublishError::Checkout(_)));
        assert!(paths.credentials_file.exists());
    }

    #[test]
    fn test_drop_removes_workspace_and_restores_credentials() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let vcs = MockVersionControl::new().with_target("tags/1.0.3");

        let workspace = WorkspacePreparer::new(&paths, &vcs, false)
            .prepare(&job())
            .unwrap();
        let path = workspace.path().to_path_buf();
        drop(workspace);

        assert!(!path.exists());
        assert!(paths.credentials_file.is_file());
    }

    #[test]
    fn test_kept_workspace_survives_and_next_run_reclaims_credentials() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let vcs = MockVersionControl::new().with_target("tags/1.0.3");
        let preparer = WorkspacePreparer::new(&paths, &vcs, true);

        let first = preparer.prepare(&job()).unwrap();
        let path = first.path().to_path_buf();
        drop(first);
        assert!(path.join("keystore.properties").is_file());
        assert!(!paths.credentials_file.exists());

        let second = preparer.prepare(&job()).unwrap();
        assert!(second.keeps_on_drop());
        assert!(second.path().join("keystore.properties").is_file());
    }

    #[test]
    #[serial]
    fn test_relative_scratch_root_yields_absolute_workspace() {
        let dir = TempDir::new().unwrap();
        let mut paths = paths(dir.path());
        paths.scratch_root = PathBuf::from("build/script");
        let vcs = MockVersionControl::new().with_target("tags/1.0.3");

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        let result = WorkspacePreparer::new(&paths, &vcs, true).prepare(&job());
        let cwd = env::current_dir().unwrap();
        env::set_current_dir(original_dir).unwrap();

        let workspace = result.unwrap();
        assert!(workspace.path().is_absolute());
        assert_eq!(workspace.path(), cwd.join("build/script/widgets"));
        assert!(workspace.path().join(LOCAL_PROPERTIES).is_file());
    }

    #[test]
    fn test_absolute_paths_are_unchanged() {
        assert_eq!(absolute(Path::new("/ws/widgets")).unwrap(), PathBuf::from("/ws/widgets"));
    }
}
