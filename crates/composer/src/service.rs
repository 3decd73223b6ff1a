//! Per-service composer

use crate::composition::{SchemaComposition, TypeComposition};
use crate::metadata::ServiceMetadata;
use crate::operation::OperationDescriptor;
use crate::shapes::ShapeRegistry;
use aws_schema_composer_common::{
    upper_first, ComposeError, ObjectType, ObjectTypeConfig, RenderedType, Result, ServiceConfig,
    TypeKind,
};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Type name of a service: `prefix` followed by the capitalized service id
pub(crate) fn service_type_name(prefix: &str, service_id: &str) -> String {
    format!("{}{}", prefix, upper_first(service_id))
}

/// Composes one AWS service into a single object type
///
/// Owns the service's metadata and shape registry. The composed and rendered
/// types are built on first request and cached for the composer's lifetime;
/// concurrent first requests build once.
pub struct ServiceComposer<C = SchemaComposition> {
    service_id: String,
    prefix: String,
    config: ServiceConfig,
    metadata: ServiceMetadata,
    shapes: ShapeRegistry,
    composition: C,
    composed: OnceCell<Arc<ObjectType>>,
    rendered: OnceCell<RenderedType>,
}

impl ServiceComposer {
    /// # Arguments
    /// * `service_id` - Service identifier (e.g., "s3", "dynamodb")
    /// * `prefix` - Type-name prefix (e.g., "Aws")
    /// * `config` - Parsed service description
    pub fn new(service_id: &str, prefix: &str, config: ServiceConfig) -> Self {
        Self::with_composition(service_id, prefix, config, SchemaComposition)
    }
}

impl<C: TypeComposition> ServiceComposer<C> {
    pub fn with_composition(
        service_id: &str,
        prefix: &str,
        config: ServiceConfig,
        composition: C,
    ) -> Self {
        let metadata = ServiceMetadata::new(config.metadata.clone());
        let shapes = ShapeRegistry::new(
            config.shapes.clone(),
            service_type_name(prefix, service_id),
        );

        Self {
            service_id: service_id.to_string(),
            prefix: prefix.to_string(),
            config,
            metadata,
            shapes,
            composition,
            composed: OnceCell::new(),
            rendered: OnceCell::new(),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Description format version
    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Paginator definitions, as loaded
    pub fn paginators(&self) -> &serde_json::Value {
        &self.config.paginators
    }

    /// Waiter definitions, as loaded
    pub fn waiters(&self) -> &serde_json::Value {
        &self.config.waiters
    }

    /// `prefix` + capitalized service id (e.g., "AwsS3")
    pub fn type_name(&self) -> String {
        service_type_name(&self.prefix, &self.service_id)
    }

    /// Operation names in declaration order
    pub fn operation_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.config.operations.keys().map(String::as_str)
    }

    /// Look up an operation, `None` when it does not exist
    pub fn find_operation(&self, name: &str) -> Option<OperationDescriptor<'_>> {
        self.config
            .operations
            .get_key_value(name)
            .map(|(name, config)| {
                OperationDescriptor::new(&self.service_id, name, config, &self.shapes)
            })
    }

    /// Look up an operation
    ///
    /// # Errors
    /// `ComposeError::OperationNotFound` when the service has no such operation
    pub fn get_operation(&self, name: &str) -> Result<OperationDescriptor<'_>> {
        self.find_operation(name)
            .ok_or_else(|| ComposeError::OperationNotFound {
                service: self.service_id.clone(),
                operation: name.to_string(),
            })
    }

    /// The service type, one field per operation
    pub fn get_composed_type(&self) -> Result<Arc<ObjectType>> {
        self.composed
            .get_or_try_init(|| self.build_composed_type())
            .map(Arc::clone)
    }

    /// Whether the composed type has been built
    pub fn is_composed(&self) -> bool {
        self.composed.get().is_some()
    }

    /// The composed type together with every shape type it references
    pub fn get_rendered_type(&self) -> Result<&RenderedType> {
        self.rendered.get_or_try_init(|| {
            let root = self.get_composed_type()?;
            self.composition.materialize(root, self.shapes.types())
        })
    }

    fn build_composed_type(&self) -> Result<Arc<ObjectType>> {
        let mut fields = IndexMap::new();
        for name in self.operation_names() {
            let operation = self.get_operation(name)?;
            fields.insert(name.to_string(), operation.field_config());
        }

        tracing::debug!(
            service_id = %self.service_id,
            type_name = %self.type_name(),
            fields = fields.len(),
            "Composed service type"
        );

        Ok(self.composition.compose(ObjectTypeConfig {
            name: self.type_name(),
            kind: TypeKind::Object,
            fields,
            description: self.metadata.description().to_string(),
        }))
    }
}

impl<C> std::fmt::Debug for ServiceComposer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceComposer")
            .field("service_id", &self.service_id)
            .field("prefix", &self.prefix)
            .field("operations", &self.config.operations.len())
            .field("composed", &self.composed.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::MockTypeComposition;
    use aws_schema_composer_common::{OperationConfig, ServiceMetadataConfig, ShapeRef};

    fn s3_config(operations: &[&str]) -> ServiceConfig {
        ServiceConfig {
            version: "2.0".to_string(),
            metadata: ServiceMetadataConfig {
                service_full_name: Some("Amazon Simple Storage Service".to_string()),
                ..Default::default()
            },
            operations: operations
                .iter()
                .map(|name| {
                    (
                        name.to_string(),
                        OperationConfig {
                            output: Some(ShapeRef::new("Output")),
                            ..Default::default()
                        },
                    )
                })
                .collect(),
            shapes: serde_json::from_str(
                r#"{ "Output": { "type": "structure", "members": { "Id": { "shape": "Id" } } },
                     "Id": { "type": "string" } }"#,
            )
            .unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_type_name() {
        let composer = ServiceComposer::new("s3", "Aws", s3_config(&[]));
        assert_eq!(composer.type_name(), "AwsS3");
        assert_eq!(composer.type_name(), composer.type_name());
        assert_eq!(composer.shapes().prefix(), "AwsS3");
    }

    #[test]
    fn test_operation_names_restartable() {
        let composer = ServiceComposer::new("s3", "Aws", s3_config(&["listBuckets", "getObject"]));
        let first: Vec<&str> = composer.operation_names().collect();
        let second: Vec<&str> = composer.operation_names().collect();
        assert_eq!(first, vec!["listBuckets", "getObject"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_operation_leaves_cache_empty() {
        let composer = ServiceComposer::new("s3", "Aws", s3_config(&["listBuckets"]));
        let err = composer.get_operation("deleteEverything").unwrap_err();
        assert!(matches!(
            err,
            ComposeError::OperationNotFound { ref service, ref operation }
                if service == "s3" && operation == "deleteEverything"
        ));
        assert!(composer.find_operation("deleteEverything").is_none());
        assert!(!composer.is_composed());
    }

    #[test]
    fn test_composes_once() {
        let mut composition = MockTypeComposition::new();
        composition
            .expect_compose()
            .times(1)
            .returning(|config| Arc::new(config.into()));

        let composer = ServiceComposer::with_composition(
            "s3",
            "Aws",
            s3_config(&["listBuckets", "getObject"]),
            composition,
        );

        let first = composer.get_composed_type().unwrap();
        let second = composer.get_composed_type().unwrap();
        let third = composer.get_composed_type().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &third));
    }

    #[test]
    fn test_rendered_type_uses_composed_type() {
        let mut composition = MockTypeComposition::new();
        composition
            .expect_compose()
            .times(1)
            .returning(|config| Arc::new(config.into()));
        composition
            .expect_materialize()
            .times(1)
            .returning(|root, types| Ok(RenderedType::new(root, types)));

        let composer =
            ServiceComposer::with_composition("s3", "Aws", s3_config(&["listBuckets"]), composition);

        let rendered = composer.get_rendered_type().unwrap();
        let composed = composer.get_composed_type().unwrap();
        assert!(Arc::ptr_eq(rendered.root(), &composed));
        assert_eq!(rendered.types().len(), 1);

        // Cached: the mock would panic on a second materialize call
        composer.get_rendered_type().unwrap();
    }

    #[test]
    fn test_description_from_metadata() {
        let composer = ServiceComposer::new("s3", "Aws", s3_config(&[]));
        let composed = composer.get_composed_type().unwrap();
        assert_eq!(
            composed.description.as_deref(),
            Some("Amazon Simple Storage Service")
        );
        assert!(composed.fields.is_empty());
    }
}
