//! Configuration for csexplain.
//!
//! Every key is optional; a missing file means the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::explain::is_builtin;

/// Where documentation links point unless configured otherwise.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.microsoft.com";

/// File names looked up in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["csexplain.yaml", ".csexplain.yaml"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplainConfig {
    /// Prefix for every documentation link.
    #[serde(default = "default_docs_base_url")]
    pub docs_base_url: String,
    /// Detector ids to leave out of the catalog.
    #[serde(default)]
    pub disabled_features: Vec<String>,
    /// Glob patterns for paths the CLI should skip (e.g., "**/Generated/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_docs_base_url() -> String {
    DEFAULT_DOCS_BASE_URL.to_string()
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            docs_base_url: default_docs_base_url(),
            disabled_features: Vec::new(),
            excluded_paths: Vec::new(),
        }
    }
}

impl ExplainConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty file deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ExplainConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the file at `explicit`, or the first default name found in `dir`.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(dir),
        };

        let config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse_file(&path).map_err(|e| {
                    anyhow::anyhow!("failed to load config {}: {}", path.display(), e)
                })?
            }
            None => Self::default(),
        };

        validate(&config)?;
        Ok(config)
    }

    pub fn feature_enabled(&self, id: &str) -> bool {
        !self.disabled_features.iter().any(|d| d == id)
    }

    /// Compile `excluded_paths` into one matcher.
    pub fn excluded_matcher(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| {
                anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// First default config file present in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &ExplainConfig) -> anyhow::Result<()> {
    let url = config.docs_base_url.trim();
    if url.is_empty() {
        anyhow::bail!("docs_base_url must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("invalid docs_base_url {:?}, must be an http(s) URL", url);
    }

    for id in &config.disabled_features {
        if !is_builtin(id) {
            anyhow::bail!("unknown feature {:?} in disabled_features", id);
        }
    }

    config.excluded_matcher()?;

    Ok(())
}
