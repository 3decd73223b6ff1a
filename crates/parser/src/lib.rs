//! Loading of AWS SDK API descriptions
//!
//! The AWS SDKs ship one JSON description per service and API version,
//! named `<service>-<api-version>.normal.json` (or `.min.json`), next to
//! optional `<service>-<api-version>.paginators.json` and
//! `<service>-<api-version>.waiters2.json` files.
//!
//! This crate turns those files into [`ServiceConfig`] values:
//! - [`AwsApiParser`] parses a single description
//! - [`ApiCatalog`] discovers every description in a directory and keeps the
//!   latest API version of each service
//!
//! Operation names are normalized to lower-first camel case
//! (`ListBuckets` → `listBuckets`), the form used as field names.

mod aws_api;
mod catalog;

pub use aws_api::{infer_service_file, sanitize_service_id, AwsApiParser, ServiceFile};
pub use catalog::{ApiCatalog, CatalogEntry};

use aws_schema_composer_common::{Result, ServiceConfig};
use std::path::Path;

/// Parse one API description file into a normalized `ServiceConfig`
///
/// # Arguments
/// * `path` - Path to a `<service>-<api-version>.normal.json` file
///
/// # Returns
/// * `(service_id, ServiceConfig)`
pub fn load_service(path: &Path) -> Result<(String, ServiceConfig)> {
    let parser = AwsApiParser::from_file(path)?;
    let service_id = parser.service_id().to_string();
    Ok((service_id, parser.into_service_config()))
}
