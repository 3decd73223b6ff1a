//! AWS service description model
//!
//! These types mirror the JSON API descriptions shipped with the AWS SDKs
//! (`<service>-<api-version>.normal.json`). Unknown keys are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named shape definitions of one service
pub type ShapesMap = IndexMap<String, ShapeConfig>;

/// Full description of one AWS service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Description format version (e.g., "2.0")
    #[serde(default)]
    pub version: String,

    /// Service metadata (names, protocol, API version)
    #[serde(default)]
    pub metadata: ServiceMetadataConfig,

    /// Operations in declaration order
    #[serde(default)]
    pub operations: IndexMap<String, OperationConfig>,

    /// Shape definitions referenced by operations
    #[serde(default)]
    pub shapes: ShapesMap,

    /// Paginator definitions, carried through untouched
    #[serde(default)]
    pub paginators: serde_json::Value,

    /// Waiter definitions, carried through untouched
    #[serde(default)]
    pub waiters: serde_json::Value,
}

/// Descriptive metadata about a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadataConfig {
    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub endpoint_prefix: Option<String>,

    /// Human-readable name (e.g., "Amazon Simple Storage Service")
    #[serde(default)]
    pub service_full_name: Option<String>,

    #[serde(default)]
    pub service_abbreviation: Option<String>,

    #[serde(default)]
    pub service_id: Option<String>,

    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub signature_version: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,
}

/// One operation of a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Original (PascalCase) operation name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub http: Option<HttpConfig>,

    #[serde(default)]
    pub input: Option<ShapeRef>,

    #[serde(default)]
    pub output: Option<ShapeRef>,

    #[serde(default)]
    pub errors: Vec<ShapeRef>,

    #[serde(default)]
    pub documentation: Option<String>,

    #[serde(default)]
    pub deprecated: bool,
}

/// HTTP binding of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub request_uri: Option<String>,

    #[serde(default)]
    pub response_code: Option<u16>,
}

/// Reference to a named shape, used by operations and structure members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRef {
    /// Target shape name
    pub shape: String,

    #[serde(default)]
    pub documentation: Option<String>,

    /// Wire location (header, uri, querystring, ...)
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub location_name: Option<String>,
}

impl ShapeRef {
    pub fn new(shape: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            documentation: None,
            location: None,
            location_name: None,
        }
    }
}

/// A shape definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeConfig {
    /// Record with named members
    Structure {
        #[serde(default)]
        members: IndexMap<String, ShapeRef>,

        /// Names of members that must be present
        #[serde(default)]
        required: Vec<String>,

        #[serde(default)]
        documentation: Option<String>,
    },

    List {
        member: ShapeRef,

        #[serde(default)]
        documentation: Option<String>,
    },

    Map {
        key: ShapeRef,

        value: ShapeRef,

        #[serde(default)]
        documentation: Option<String>,
    },

    String {
        /// Allowed values when the string is an enumeration
        #[serde(default, rename = "enum")]
        values: Vec<String>,

        #[serde(default)]
        documentation: Option<String>,
    },

    Character {
        #[serde(default)]
        documentation: Option<String>,
    },

    Integer {
        #[serde(default)]
        documentation: Option<String>,
    },

    Long {
        #[serde(default)]
        documentation: Option<String>,
    },

    Float {
        #[serde(default)]
        documentation: Option<String>,
    },

    Double {
        #[serde(default)]
        documentation: Option<String>,
    },

    BigInteger {
        #[serde(default)]
        documentation: Option<String>,
    },

    BigDecimal {
        #[serde(default)]
        documentation: Option<String>,
    },

    Boolean {
        #[serde(default)]
        documentation: Option<String>,
    },

    Timestamp {
        #[serde(default)]
        documentation: Option<String>,
    },

    Blob {
        #[serde(default)]
        documentation: Option<String>,
    },

    /// Fallback for shape types without a schema mapping
    #[serde(other)]
    Other,
}

impl ShapeConfig {
    /// Documentation attached to the shape, if any
    pub fn documentation(&self) -> Option<&str> {
        match self {
            ShapeConfig::Structure { documentation, .. }
            | ShapeConfig::List { documentation, .. }
            | ShapeConfig::Map { documentation, .. }
            | ShapeConfig::String { documentation, .. }
            | ShapeConfig::Character { documentation }
            | ShapeConfig::Integer { documentation }
            | ShapeConfig::Long { documentation }
            | ShapeConfig::Float { documentation }
            | ShapeConfig::Double { documentation }
            | ShapeConfig::BigInteger { documentation }
            | ShapeConfig::BigDecimal { documentation }
            | ShapeConfig::Boolean { documentation }
            | ShapeConfig::Timestamp { documentation }
            | ShapeConfig::Blob { documentation } => documentation.as_deref(),
            ShapeConfig::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_config() {
        let json = r#"{
            "version": "2.0",
            "metadata": {
                "apiVersion": "2006-03-01",
                "endpointPrefix": "s3",
                "serviceFullName": "Amazon Simple Storage Service",
                "protocol": "rest-xml"
            },
            "operations": {
                "ListBuckets": {
                    "name": "ListBuckets",
                    "http": { "method": "GET", "requestUri": "/" },
                    "output": { "shape": "ListBucketsOutput" }
                },
                "GetObject": {
                    "name": "GetObject",
                    "input": { "shape": "GetObjectRequest" },
                    "output": { "shape": "GetObjectOutput" },
                    "documentation": "Retrieves objects from Amazon S3."
                }
            },
            "shapes": {
                "GetObjectRequest": {
                    "type": "structure",
                    "required": ["Bucket"],
                    "members": {
                        "Bucket": { "shape": "BucketName", "location": "uri", "locationName": "Bucket" }
                    }
                },
                "BucketName": { "type": "string" },
                "Buckets": { "type": "list", "member": { "shape": "Bucket", "locationName": "Bucket" } },
                "Size": { "type": "long" },
                "Union": { "type": "union" }
            }
        }"#;

        let config: ServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, "2.0");
        assert_eq!(
            config.metadata.service_full_name.as_deref(),
            Some("Amazon Simple Storage Service")
        );

        let names: Vec<&str> = config.operations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["ListBuckets", "GetObject"]);

        let list_buckets = &config.operations["ListBuckets"];
        assert_eq!(
            list_buckets.http.as_ref().and_then(|h| h.request_uri.as_deref()),
            Some("/")
        );
        assert!(list_buckets.input.is_none());

        match &config.shapes["GetObjectRequest"] {
            ShapeConfig::Structure {
                members, required, ..
            } => {
                assert_eq!(required, &vec!["Bucket".to_string()]);
                assert_eq!(members["Bucket"].location.as_deref(), Some("uri"));
            }
            other => panic!("Expected structure, got {:?}", other),
        }
        assert!(matches!(config.shapes["Size"], ShapeConfig::Long { .. }));
        assert_eq!(config.shapes["Union"], ShapeConfig::Other);
        assert!(config.paginators.is_null());
    }

    #[test]
    fn test_shape_documentation() {
        let shape: ShapeConfig =
            serde_json::from_str(r#"{ "type": "integer", "documentation": "Count" }"#).unwrap();
        assert_eq!(shape.documentation(), Some("Count"));
        assert_eq!(ShapeConfig::Other.documentation(), None);
    }
}
