use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MvnPublishError, Result};

/// Group id prefix used when the group is derived from the source URL
pub const DEFAULT_GROUP_PREFIX: &str = "com.github";

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid identifier pattern"));

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-+]+$").expect("valid version pattern"));

/// Owner and repository name taken from the last two segments of a source URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Lower-cased owner segment
    pub org_id: String,
    /// Repository segment as written, minus any `.git` suffix
    pub repo_name: String,
}

impl SourceLocation {
    /// Split `https://github.com/<org>/<repo>` into its owner and repository parts.
    pub fn from_url(url: &str) -> Result<Self> {
        let trimmed = url.trim_end_matches('/');
        let mut parts = trimmed.rsplit('/');

        let repo = parts.next().unwrap_or_default();
        let org = parts.next().unwrap_or_default();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        // scp-style remotes put the owner after the host separator
        let org = org.rsplit(':').next().unwrap_or_default();

        if repo.is_empty() || org.is_empty() {
            return Err(MvnPublishError::configuration(format!(
                "Error: URL '{}' must end with <org>/<repo>.",
                url
            )));
        }

        Ok(SourceLocation {
            org_id: org.to_lowercase(),
            repo_name: repo.to_string(),
        })
    }

    pub fn default_group_id(&self) -> String {
        format!("{}.{}", DEFAULT_GROUP_PREFIX, self.org_id)
    }

    pub fn default_artifact_id(&self) -> String {
        self.repo_name.to_lowercase()
    }
}

/// The (group, artifact, version) triple identifying a published binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        ArtifactCoordinates {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Reject coordinates Maven would refuse before anything touches the disk.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&str, &str, &Regex); 3] = [
            ("group id", &self.group_id, &IDENTIFIER_PATTERN),
            ("artifact id", &self.artifact_id, &IDENTIFIER_PATTERN),
            ("version", &self.version, &VERSION_PATTERN),
        ];

        for (label, value, pattern) in fields {
            if !pattern.is_match(value) {
                return Err(MvnPublishError::configuration(format!(
                    "Error: Invalid {} '{}'.",
                    label, value
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
