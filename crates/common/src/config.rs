//! Composer configuration loaded from YAML
//!
//! ```yaml
//! prefix: Aws
//! spec_dir: ./aws-sdk-js/apis
//! services:
//!   - s3
//!   - dynamodb
//! ```

use crate::{ComposeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "Aws";

/// Settings shared by every composer invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComposerConfig {
    /// Type-name prefix for all generated types
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Directory holding the SDK API description files
    #[serde(default)]
    pub spec_dir: Option<PathBuf>,

    /// Service ids to include; all services when absent
    #[serde(default)]
    pub services: Option<Vec<String>>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            spec_dir: None,
            services: None,
        }
    }
}

impl ComposerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ComposeError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            ComposeError::Parse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Whether `service_id` passes the allow-list
    pub fn includes(&self, service_id: &str) -> bool {
        match &self.services {
            Some(allowed) => allowed.iter().any(|s| s.eq_ignore_ascii_case(service_id)),
            None => true,
        }
    }
}
