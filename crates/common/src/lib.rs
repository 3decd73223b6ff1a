//! Common types and utilities for AWS Schema Composer
//!
//! This crate contains the data structures shared across the parser,
//! composer, renderer and CLI components:
//! - the raw AWS service description model ([`ServiceConfig`])
//! - the schema type model produced by composition ([`ObjectType`], [`TypeRef`])
//! - the error type and naming helpers

mod config;
pub mod naming;
pub mod schema;
pub mod service;

pub use config::{ComposerConfig, DEFAULT_PREFIX};
pub use naming::{lower_first, upper_first};
pub use schema::{
    ArgumentConfig, FieldConfig, ObjectType, ObjectTypeConfig, RenderedType, ResolverStub, Scalar,
    TypeKind, TypeRef,
};
pub use service::{
    HttpConfig, OperationConfig, ServiceConfig, ServiceMetadataConfig, ShapeConfig, ShapeRef,
    ShapesMap,
};

use thiserror::Error;

/// Errors that can occur while loading, composing or rendering service types
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Operation with name {operation} does not exist in service {service}")]
    OperationNotFound { service: String, operation: String },

    #[error("Service with name {0} does not exist")]
    ServiceNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for composer operations
pub type Result<T> = std::result::Result<T, ComposeError>;
