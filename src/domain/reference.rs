use std::fmt;

use crate::error::{MvnPublishError, Result};

/// A point in the source project's history to publish from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Tag(String),
    Branch(String),
    Commit(String),
}

impl Reference {
    /// Pick a reference from independently supplied tag/branch/commit values.
    ///
    /// Empty strings count as absent. When several are present the tag wins,
    /// then the branch, then the commit.
    pub fn select(tag: Option<&str>, branch: Option<&str>, commit: Option<&str>) -> Result<Self> {
        let present = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        if let Some(tag) = present(tag) {
            Ok(Reference::Tag(tag))
        } else if let Some(branch) = present(branch) {
            Ok(Reference::Branch(branch))
        } else if let Some(commit) = present(commit) {
            Ok(Reference::Commit(commit))
        } else {
            Err(MvnPublishError::MissingReference)
        }
    }

    /// The raw tag, branch or commit value
    pub fn name(&self) -> &str {
        match self {
            Reference::Tag(name) | Reference::Branch(name) | Reference::Commit(name) => name,
        }
    }

    /// Version string derived from the reference when no override is given
    pub fn version(&self) -> &str {
        self.name()
    }

    /// Expression handed to the version-control tool to check this reference out
    pub fn checkout_target(&self) -> String {
        match self {
            Reference::Tag(tag) => format!("tags/{}", tag),
            Reference::Branch(branch) => branch.clone(),
            Reference::Commit(commit) => commit.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Reference::Tag(_) => "tag",
            Reference::Branch(_) => "branch",
            Reference::Commit(_) => "commit",
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_reference() {
        let reference = Reference::select(Some("1.0.3"), None, None).unwrap();
        assert_eq!(reference, Reference::Tag("1.0.3".to_string()));
        assert_eq!(reference.version(), "1.0.3");
        assert_eq!(reference.checkout_target(), "tags/1.0.3");
    }

    #[test]
    fn test_branch_reference() {
        let reference = Reference::select(Some(""), Some("develop"), Some("")).unwrap();
        assert_eq!(reference.version(), "develop");
        assert_eq!(reference.checkout_target(), "develop");
    }

    #[test]
    fn test_commit_reference() {
        let reference = Reference::select(None, None, Some("3febbac689")).unwrap();
        assert_eq!(reference.version(), "3febbac689");
        assert_eq!(reference.checkout_target(), "3febbac689");
    }

    #[test]
    fn test_tag_wins_over_branch_and_commit() {
        let reference = Reference::select(Some("v2"), Some("main"), Some("abc")).unwrap();
        assert_eq!(reference, Reference::Tag("v2".to_string()));

        let reference = Reference::select(None, Some("main"), Some("abc")).unwrap();
        assert_eq!(reference, Reference::Branch("main".to_string()));
    }

    #[test]
    fn test_missing_reference() {
        let result = Reference::select(Some(""), None, Some(""));
        assert!(matches!(result, Err(MvnPublishError::MissingReference)));
    }

    #[test]
    fn test_display() {
        let reference = Reference::Commit("3febbac689".to_string());
        assert_eq!(reference.to_string(), "commit '3febbac689'");
    }
}
