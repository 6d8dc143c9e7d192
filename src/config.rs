use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MvnPublishError, Result};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "mvnpublish.toml";

/// Represents the complete configuration for mvn-publish.
///
/// Contains the target artifact repository, scratch layout, external tool names and
/// behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_repository_id() -> String {
    "somewear-artifacts".to_string()
}

fn default_repository_url() -> String {
    "https://somewear-artifacts.appspot.com".to_string()
}

fn default_packaging() -> String {
    "aar".to_string()
}

/// Remote Maven repository the artifact is deployed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    /// Server id matching an entry in `~/.m2/settings.xml`
    #[serde(default = "default_repository_id")]
    pub id: String,

    #[serde(default = "default_repository_url")]
    pub url: String,

    #[serde(default = "default_packaging")]
    pub packaging: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            id: default_repository_id(),
            url: default_repository_url(),
            packaging: default_packaging(),
        }
    }
}

fn default_scratch_root() -> PathBuf {
    PathBuf::from("build/script")
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("build/keystore.properties")
}

/// Conventional per-user Android SDK install location.
fn default_sdk_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join("Library")
        .join("Android")
        .join("sdk")
}

/// Filesystem layout used while publishing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Directory holding one workspace per repository name
    #[serde(default = "default_scratch_root")]
    pub scratch_root: PathBuf,

    /// Credentials file moved into every workspace
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,

    /// Written to `local.properties` when the project has none
    #[serde(default = "default_sdk_dir")]
    pub sdk_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            scratch_root: default_scratch_root(),
            credentials_file: default_credentials_file(),
            sdk_dir: default_sdk_dir(),
        }
    }
}

fn default_gradle() -> String {
    "gradle".to_string()
}

fn default_wrapper() -> String {
    "gradlew".to_string()
}

fn default_maven() -> String {
    "mvn".to_string()
}

/// External programs the pipeline drives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    /// System Gradle, only used to generate a replacement wrapper
    #[serde(default = "default_gradle")]
    pub gradle: String,

    /// Wrapper launcher, relative to the workspace root
    #[serde(default = "default_wrapper")]
    pub wrapper: String,

    #[serde(default = "default_maven")]
    pub maven: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            gradle: default_gradle(),
            wrapper: default_wrapper(),
            maven: default_maven(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Leave the workspace on disk after the run instead of removing it
    #[serde(default)]
    pub keep_workspace: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `mvnpublish.toml` in current directory
/// 3. `.mvnpublish.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        read_config_file(Path::new(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| MvnPublishError::configuration(format!("Error: Invalid config file: {}", e)))
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        MvnPublishError::configuration(format!(
            "Error: Cannot read config file {}: {}",
            path.display(),
            e
        ))
    })
}
