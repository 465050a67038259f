//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error in `{}`", .0.display())]
    Yaml(PathBuf, #[source] serde_yaml::Error),
}

/// Order in which indexed posts are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOrder {
    /// Whatever order the file system enumerates the directory in
    #[default]
    Listing,
    /// Sorted by file name
    Filename,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Content
    /// Directory holding the posts, relative to the base directory
    pub posts_dir: String,
    pub order: IndexOrder,

    // Writing
    pub new_post_name: String,

    // Date format (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: String::new(),
            url: "http://example.com".to_string(),

            posts_dir: "posts".to_string(),
            order: IndexOrder::Listing,

            new_post_name: ":title.mdx".to_string(),

            date_format: "YYYY-MM-DD".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}
