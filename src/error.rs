use thiserror::Error;

/// Unified error type for mvn-publish operations
///
/// Every variant is terminal for the job. Nothing already written to disk is
/// rolled back.
#[derive(Error, Debug)]
pub enum MvnPublishError {
    #[error("{0}")]
    Configuration(String),

    #[error("You must specify a tag, branch, or commit.")]
    MissingReference,

    #[error("Checkout failed: {0}")]
    Checkout(String),

    #[error("Gradle wrapper bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("{0}")]
    Build(String),

    #[error("Deploy failed: {0}")]
    Publish(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mvn-publish
pub type Result<T> = std::result::Result<T, MvnPublishError>;

impl MvnPublishError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        MvnPublishError::Configuration(msg.into())
    }

    pub fn checkout(msg: impl Into<String>) -> Self {
        MvnPublishError::Checkout(msg.into())
    }

    pub fn bootstrap(msg: impl Into<String>) -> Self {
        MvnPublishError::Bootstrap(msg.into())
    }

    pub fn build(msg: impl Into<String>) -> Self {
        MvnPublishError::Build(msg.into())
    }

    pub fn publish(msg: impl Into<String>) -> Self {
        MvnPublishError::Publish(msg.into())
    }

    pub fn workspace(msg: impl Into<String>) -> Self {
        MvnPublishError::Workspace(msg.into())
    }

    /// Process exit code reported for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            MvnPublishError::Configuration(_) => 2,
            MvnPublishError::MissingReference => 3,
            MvnPublishError::Checkout(_) => 4,
            MvnPublishError::Bootstrap(_) => 5,
            MvnPublishError::Build(_) => 6,
            MvnPublishError::Publish(_) => 7,
            MvnPublishError::Workspace(_) => 8,
            MvnPublishError::Git(_) | MvnPublishError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_is_verbatim() {
        let err = MvnPublishError::configuration("Error: URL is required.");
        assert_eq!(err.to_string(), "Error: URL is required.");
    }

    #[test]
    fn test_missing_reference_message() {
        assert_eq!(
            MvnPublishError::MissingReference.to_string(),
            "You must specify a tag, branch, or commit."
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MvnPublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let errors = vec![
            MvnPublishError::configuration("x"),
            MvnPublishError::MissingReference,
            MvnPublishError::checkout("x"),
            MvnPublishError::bootstrap("x"),
            MvnPublishError::build("x"),
            MvnPublishError::publish("x"),
            MvnPublishError::workspace("x"),
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (MvnPublishError::checkout("x"), "Checkout failed"),
            (MvnPublishError::bootstrap("x"), "Gradle wrapper bootstrap failed"),
            (MvnPublishError::publish("x"), "Deploy failed"),
            (MvnPublishError::workspace("x"), "Workspace error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
