//! Service-to-type composition
//!
//! Binds a service's metadata, operations and shapes into one named,
//! cached GraphQL object type.
//!
//! ## Flow
//!
//! 1. [`ServiceComposer::get_composed_type`] iterates the operation names
//! 2. each name yields an [`OperationDescriptor`], which produces one field
//! 3. descriptors resolve argument and return types through the service's
//!    [`ShapeRegistry`]
//! 4. the fields and the [`ServiceMetadata`] description are handed to a
//!    [`TypeComposition`]; the result is cached for the composer's lifetime
//!
//! [`AwsApi`] repeats the same pattern one level up, with one field per service.
//!
//! ## Usage
//! ```rust,ignore
//! use aws_schema_composer::ServiceComposer;
//!
//! let (service_id, config) = aws_schema_composer_parser::load_service(path)?;
//! let s3 = ServiceComposer::new(&service_id, "Aws", config);
//! assert_eq!(s3.type_name(), "AwsS3");
//! let rendered = s3.get_rendered_type()?;
//! ```

mod api;
mod composition;
mod metadata;
mod operation;
mod service;
mod shapes;

pub use api::AwsApi;
pub use composition::{SchemaComposition, TypeComposition};
pub use metadata::ServiceMetadata;
pub use operation::OperationDescriptor;
pub use service::ServiceComposer;
pub use shapes::{ShapeRegistry, ShapeUsage};

pub use aws_schema_composer_common::{ComposeError, Result};
