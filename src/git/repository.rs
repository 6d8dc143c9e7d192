use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, BranchType, ErrorCode, FetchOptions, RemoteCallbacks, Repository};
use tracing::debug;

use crate::error::{MvnPublishError, Result};
use crate::git::{VersionControl, ORIGIN};

/// [VersionControl] backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Client;

impl Git2Client {
    pub fn new() -> Self {
        Git2Client
    }
}

/// Credentials callback trying ssh keys from `~/.ssh`, then the agent, then
/// git's default credential helpers.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

fn fetch_options<'a>() -> FetchOptions<'a> {
    let mut options = FetchOptions::new();
    options.remote_callbacks(remote_callbacks());
    options.download_tags(AutotagOption::All);
    options
}

/// Resolve a checkout target the way `git checkout` would, falling back to the
/// remote-tracking branch when no local branch of that name exists.
fn resolve_target<'r>(
    repo: &'r Repository,
    target: &str,
) -> std::result::Result<(git2::Object<'r>, Option<git2::Reference<'r>>), git2::Error> {
    match repo.revparse_ext(target) {
        Ok(found) => Ok(found),
        Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::InvalidSpec => {
            repo.revparse_ext(&format!("{}/{}", ORIGIN, target))
        }
        Err(e) => Err(e),
    }
}

impl VersionControl for Git2Client {
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()> {
        debug!(%url, destination = %destination.display(), "cloning");

        RepoBuilder::new()
            .fetch_options(fetch_options())
            .clone(url, destination)?;

        Ok(())
    }

    fn fetch_all(&self, workdir: &Path) -> Result<()> {
        let repo = Repository::open(workdir)?;
        let mut remote = repo.find_remote(ORIGIN)?;

        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", ORIGIN);
        let refspecs = [refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];

        debug!(workdir = %workdir.display(), "fetching all branches and tags");
        remote.fetch(&refspecs, Some(&mut fetch_options()), None)?;

        Ok(())
    }

    fn checkout(&self, workdir: &Path, target: &str) -> Result<()> {
        let repo = Repository::open(workdir)?;

        let (object, reference) = resolve_target(&repo, target).map_err(|e| {
            MvnPublishError::checkout(format!("'{}' does not exist in the remote: {}", target, e))
        })?;

        let commit = object.peel_to_commit().map_err(|e| {
            MvnPublishError::checkout(format!("'{}' does not point at a commit: {}", target, e))
        })?;

        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
            .map_err(|e| MvnPublishError::checkout(format!("Cannot check out '{}': {}", target, e)))?;

        match reference {
            Some(reference) if reference.is_branch() => {
                let name = reference.name().ok_or_else(|| {
                    MvnPublishError::checkout(format!("Branch '{}' has an invalid name", target))
                })?;
                repo.set_head(name)?;
            }
            Some(reference) if reference.is_remote() => {
                // Same as git's checkout DWIM: create a local branch from the remote one
                match repo.find_branch(target, BranchType::Local) {
                    Ok(_) => {}
                    Err(e) if e.code() == ErrorCode::NotFound => {
                        repo.branch(target, &commit, false)?;
                    }
                    Err(e) => return Err(e.into()),
                }
                repo.set_head(&format!("refs/heads/{}", target))?;
            }
            _ => repo.set_head_detached(commit.id())?,
        }

        debug!(%target, commit = %commit.id(), "checked out");
        Ok(())
    }
}
