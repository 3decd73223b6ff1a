//! Single API description parser

use aws_schema_composer_common::{lower_first, ComposeError, Result, ServiceConfig};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Suffixes of the description variants shipped by the SDKs with their
/// preference rank; `.min.json` drops documentation and ranks last
const DESCRIPTION_SUFFIXES: &[(&str, usize)] =
    &[(".normal.json", 0), (".api.json", 1), (".min.json", 3)];

/// Rank of a plain `<service>-<version>.json` description
const PLAIN_JSON_PREFERENCE: usize = 2;

/// Service id and API version encoded in a description file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFile {
    /// Sanitized service id (e.g., "s3", "cognitoidp")
    pub service_id: String,

    /// API version date (e.g., "2006-03-01")
    pub api_version: String,

    /// File name without the description suffix (e.g., "s3-2006-03-01")
    pub base_name: String,

    /// Rank of the file variant among files of the same version; lower is preferred
    pub preference: usize,
}

/// Split a description file name into service id and API version
///
/// Returns `None` for files that are not API descriptions (paginators,
/// waiters, examples) or that carry no `YYYY-MM-DD` version.
///
/// # Examples
/// ```
/// use aws_schema_composer_parser::infer_service_file;
///
/// let file = infer_service_file("cognito-idp-2016-04-18.min.json").unwrap();
/// assert_eq!(file.service_id, "cognitoidp");
/// assert_eq!(file.api_version, "2016-04-18");
/// assert!(infer_service_file("s3-2006-03-01.paginators.json").is_none());
/// ```
pub fn infer_service_file(file_name: &str) -> Option<ServiceFile> {
    let (base_name, preference) = DESCRIPTION_SUFFIXES
        .iter()
        .find_map(|(suffix, rank)| file_name.strip_suffix(*suffix).map(|base| (base, *rank)))
        .or_else(|| {
            // Plain "<service>-<version>.json"; anything with another dot-suffix is auxiliary
            file_name
                .strip_suffix(".json")
                .filter(|stem| !stem.rsplit('-').next().unwrap_or("").contains('.'))
                .map(|base| (base, PLAIN_JSON_PREFERENCE))
        })?;

    let parts: Vec<&str> = base_name.split('-').collect();
    if parts.len() < 4 {
        return None;
    }

    let (name_parts, date_parts) = parts.split_at(parts.len() - 3);
    let is_date = date_parts[0].len() == 4
        && date_parts[1].len() == 2
        && date_parts[2].len() == 2
        && date_parts
            .iter()
            .all(|p| p.chars().all(|c| c.is_ascii_digit()));
    if !is_date {
        return None;
    }

    let service_id = sanitize_service_id(&name_parts.join("-"));
    if service_id.is_empty() {
        return None;
    }

    Some(ServiceFile {
        service_id,
        api_version: date_parts.join("-"),
        base_name: base_name.to_string(),
        preference,
    })
}

/// Reduce a raw service name to lower-case ASCII alphanumerics
///
/// # Examples
/// ```
/// use aws_schema_composer_parser::sanitize_service_id;
///
/// assert_eq!(sanitize_service_id("runtime.sagemaker"), "runtimesagemaker");
/// assert_eq!(sanitize_service_id("S3"), "s3");
/// ```
pub fn sanitize_service_id(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// AWS SDK API description parser
///
/// Reads one service description and normalizes it into a `ServiceConfig`
pub struct AwsApiParser {
    /// Description as loaded
    config: ServiceConfig,

    /// Service id (e.g., "s3", "dynamodb")
    service_id: String,
}

impl AwsApiParser {
    /// Load a description from file path
    ///
    /// The service id is taken from the file name, falling back to
    /// `metadata.endpointPrefix`.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = AwsApiParser::from_file("apis/s3-2006-03-01.normal.json")?;
    /// assert_eq!(parser.service_id(), "s3");
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ComposeError::Parse(format!(
                "Failed to read API description {}: {}",
                path.display(),
                e
            ))
        })?;

        let from_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(infer_service_file)
            .map(|f| f.service_id);

        let config = Self::parse_json(&content)
            .map_err(|e| ComposeError::Parse(format!("{}: {}", path.display(), e)))?;

        let service_id = from_name
            .or_else(|| {
                config
                    .metadata
                    .endpoint_prefix
                    .as_deref()
                    .map(sanitize_service_id)
            })
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ComposeError::Parse(format!(
                    "Cannot determine service id for {}",
                    path.display()
                ))
            })?;

        tracing::debug!(
            service_id = %service_id,
            operations = config.operations.len(),
            shapes = config.shapes.len(),
            "Loaded API description from {}",
            path.display()
        );

        Ok(Self { config, service_id })
    }

    /// Parse a description from a JSON string
    pub fn from_json(json: &str, service_id: &str) -> Result<Self> {
        let config = Self::parse_json(json)?;
        Ok(Self {
            config,
            service_id: service_id.to_string(),
        })
    }

    fn parse_json(json: &str) -> Result<ServiceConfig> {
        serde_json::from_str(json)
            .map_err(|e| ComposeError::Parse(format!("Failed to parse API description JSON: {}", e)))
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Normalized copy of the description
    pub fn parse(&self) -> ServiceConfig {
        normalize(self.config.clone())
    }

    /// Normalized description, consuming the parser
    pub fn into_service_config(self) -> ServiceConfig {
        normalize(self.config)
    }

    /// Reference to the description as loaded
    pub fn raw_config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Re-key operations by lower-first name, recording the original name
fn normalize(mut config: ServiceConfig) -> ServiceConfig {
    let operations = std::mem::take(&mut config.operations);
    config.operations = operations
        .into_iter()
        .map(|(name, mut operation)| {
            if operation.name.is_none() {
                operation.name = Some(name.clone());
            }
            (lower_first(&name), operation)
        })
        .collect::<IndexMap<_, _>>();
    config
}
