//! Operation-to-field translation

use crate::shapes::{trimmed_description, ShapeRegistry};
use aws_schema_composer_common::{
    ArgumentConfig, FieldConfig, OperationConfig, ResolverStub, Scalar, TypeRef,
};
use indexmap::IndexMap;

/// Name of the single argument carrying the operation input
pub const INPUT_ARG: &str = "input";

/// One operation of a service, bound to that service's shape registry
///
/// Created per lookup by [`crate::ServiceComposer::get_operation`]; borrows
/// from the composer and cannot outlive it.
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor<'a> {
    service_id: &'a str,
    name: &'a str,
    config: &'a OperationConfig,
    shapes: &'a ShapeRegistry,
}

impl<'a> OperationDescriptor<'a> {
    pub fn new(
        service_id: &'a str,
        name: &'a str,
        config: &'a OperationConfig,
        shapes: &'a ShapeRegistry,
    ) -> Self {
        Self {
            service_id,
            name,
            config,
            shapes,
        }
    }

    pub fn service_id(&self) -> &'a str {
        self.service_id
    }

    /// Field name of the operation (e.g., "listBuckets")
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn config(&self) -> &'a OperationConfig {
        self.config
    }

    /// `input` argument from the input shape; none when the operation takes no input
    ///
    /// The argument is non-null when the input structure has required members.
    pub fn args(&self) -> IndexMap<String, ArgumentConfig> {
        let mut args = IndexMap::new();
        if let Some(input) = &self.config.input {
            let mut type_ref = self.shapes.input_type(&input.shape);
            if self.shapes.has_required_members(&input.shape) {
                type_ref = type_ref.non_null();
            }
            args.insert(
                INPUT_ARG.to_string(),
                ArgumentConfig {
                    type_ref,
                    description: trimmed_description(input.documentation.as_deref()),
                },
            );
        }
        args
    }

    /// Output shape type; `JSON` when the operation returns nothing
    pub fn return_type(&self) -> TypeRef {
        match &self.config.output {
            Some(output) => self.shapes.output_type(&output.shape),
            None => Scalar::Json.into(),
        }
    }

    pub fn resolver(&self) -> ResolverStub {
        ResolverStub::Operation {
            service_id: self.service_id.to_string(),
            operation: self.name.to_string(),
        }
    }

    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            type_ref: self.return_type(),
            args: self.args(),
            description: trimmed_description(self.config.documentation.as_deref()),
            resolver: Some(self.resolver()),
        }
    }
}
