//! Directory discovery of API descriptions

use crate::aws_api::{infer_service_file, AwsApiParser};
use aws_schema_composer_common::{ComposeError, Result, ServiceConfig};
use indexmap::IndexMap;
use serde::Deserialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered service description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub service_id: String,
    pub api_version: String,
    pub path: PathBuf,
    pub paginators_path: Option<PathBuf>,
    pub waiters_path: Option<PathBuf>,
}

#[derive(Deserialize)]
struct PaginatorsFile {
    #[serde(default)]
    pagination: serde_json::Value,
}

#[derive(Deserialize)]
struct WaitersFile {
    #[serde(default)]
    waiters: serde_json::Value,
}

/// Set of API descriptions found in a directory, one per service id
#[derive(Debug, Clone, Default)]
pub struct ApiCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl ApiCatalog {
    /// Scan `dir` for API descriptions
    ///
    /// When a service has several API versions the latest one wins. Between
    /// variants of the same version, `.normal.json` is preferred over
    /// `.api.json`, plain `.json` and `.min.json`.
    /// Entries are ordered by service id.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ComposeError::Parse(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut entries: IndexMap<String, CatalogEntry> = IndexMap::new();
        let mut ranks: HashMap<String, usize> = HashMap::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(file) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(infer_service_file)
            else {
                continue;
            };

            if let Some(existing) = entries.get(&file.service_id) {
                // Same version: the more complete variant wins, independent of directory order
                let existing_preference = ranks
                    .get(&file.service_id)
                    .copied()
                    .unwrap_or(usize::MAX);
                let current = (existing.api_version.as_str(), Reverse(existing_preference));
                let candidate = (file.api_version.as_str(), Reverse(file.preference));
                if current >= candidate {
                    tracing::debug!(
                        "Skipping {} (superseded by {})",
                        path.display(),
                        existing.path.display()
                    );
                    continue;
                }
            }

            let sibling = |suffix: &str| {
                let candidate = dir.join(format!("{}.{}", file.base_name, suffix));
                candidate.is_file().then_some(candidate)
            };

            tracing::debug!(service_id = %file.service_id, "Found {}", path.display());
            ranks.insert(file.service_id.clone(), file.preference);
            entries.insert(
                file.service_id.clone(),
                CatalogEntry {
                    paginators_path: sibling("paginators.json"),
                    waiters_path: sibling("waiters2.json"),
                    service_id: file.service_id,
                    api_version: file.api_version,
                    path,
                },
            );
        }

        entries.sort_keys();
        Ok(Self { entries })
    }

    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn get(&self, service_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(service_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only services accepted by `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|id, _| keep(id));
    }

    /// Load one service, attaching its paginators and waiters
    pub fn load(&self, service_id: &str) -> Result<ServiceConfig> {
        let entry = self
            .get(service_id)
            .ok_or_else(|| ComposeError::ServiceNotFound(service_id.to_string()))?;

        let mut config = AwsApiParser::from_file(&entry.path)?.into_service_config();

        if let Some(path) = &entry.paginators_path {
            let file: PaginatorsFile = read_json(path)?;
            config.paginators = file.pagination;
        }
        if let Some(path) = &entry.waiters_path {
            let file: WaitersFile = read_json(path)?;
            config.waiters = file.waiters;
        }

        Ok(config)
    }

    /// Load every service in the catalog
    pub fn load_all(&self) -> Result<IndexMap<String, ServiceConfig>> {
        self.service_ids()
            .map(|id| Ok((id.to_string(), self.load(id)?)))
            .collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ComposeError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}
