//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control steps
//! of a publish: cloning the source project, fetching every ref and tag, and
//! checking out the requested reference.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionControl] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Client]: A real implementation using the `git2` crate
//! - [mock::MockVersionControl]: A mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use mvn_publish::git::VersionControl;
//! # use std::path::Path;
//! # fn example<V: VersionControl>(vcs: &V) -> mvn_publish::Result<()> {
//! let workdir = Path::new("build/script/widgets");
//! vcs.clone_repository("https://github.com/acme/widgets", workdir)?;
//! vcs.fetch_all(workdir)?;
//! vcs.checkout(workdir, "tags/1.0.3")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockVersionControl;
pub use repository::Git2Client;

use std::path::Path;

use crate::error::Result;

/// Remote name used for the cloned source project
pub const ORIGIN: &str = "origin";

/// Version-control operations needed to prepare a workspace
///
/// ## Error Handling
///
/// Clone and fetch failures surface as [crate::error::MvnPublishError::Git].
/// A checkout target that cannot be resolved surfaces as
/// [crate::error::MvnPublishError::Checkout].
pub trait VersionControl: Send + Sync {
    /// Clone `url` into `destination`, which must not exist yet
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()>;

    /// Fetch all branches and tags from the origin remote
    ///
    /// Needed so an arbitrary tag, branch or commit can be checked out after
    /// the initial clone.
    fn fetch_all(&self, workdir: &Path) -> Result<()>;

    /// Check out a target expression
    ///
    /// # Arguments
    /// * `workdir` - Root of the cloned repository
    /// * `target` - `tags/<tag>`, a branch name, or a (possibly abbreviated) commit
    fn checkout(&self, workdir: &Path, target: &str) -> Result<()>;
}
