use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project config file, looked up from the current directory upwards
pub const PROJECT_FILE: &str = "docseal.toml";

/// Configuration for docseal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub denylist: DenylistConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Minimum length of a digit-bearing value before randomness is checked
    #[serde(default = "default_min_secret_length")]
    pub min_secret_length: usize,

    /// Key words treated like `password` or `token`
    #[serde(default)]
    pub extra_key_hints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenylistConfig {
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Extension → highlighting language, on top of the built-in map
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            min_secret_length: default_min_secret_length(),
            extra_key_hints: Vec::new(),
        }
    }
}

impl Default for DenylistConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

fn default_placeholder() -> String {
    "REDACTED".to_string()
}

fn default_min_secret_length() -> usize {
    10
}

fn default_patterns() -> Vec<String> {
    vec![
        "**/.env*".to_string(),
        "**/.aws/**".to_string(),
        "**/.ssh/**".to_string(),
        "**/*_rsa".to_string(),
        "**/*.key".to_string(),
        "**/*.pem".to_string(),
        "**/*.p12".to_string(),
        "**/credentials".to_string(),
        "**/*.tfstate".to_string(),
        "**/*.tfstate.backup".to_string(),
    ]
}

impl Config {
    /// Load config: explicit path, else `docseal.toml` above the current
    /// directory, else the user config file, else defaults
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        match Self::resolve_path(explicit, &cwd) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Which config file [`Config::load`] would read
    pub fn resolve_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        Self::find_project_file_from(cwd)
            .or_else(|| Self::user_config_path().filter(|path| path.exists()))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let placeholder = &self.redaction.placeholder;
        if placeholder.trim().is_empty() || placeholder.contains(['\n', '\r']) {
            anyhow::bail!(
                "redaction.placeholder must be a non-empty single line: {:?}",
                placeholder
            );
        }
        Ok(())
    }

    /// Find `docseal.toml` by walking up from given directory
    pub fn find_project_file_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "docseal", "docseal")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
