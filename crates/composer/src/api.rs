//! Multi-service root composer

use crate::composition::{SchemaComposition, TypeComposition};
use crate::service::{service_type_name, ServiceComposer};
use aws_schema_composer_common::{
    lower_first, ComposeError, FieldConfig, ObjectType, ObjectTypeConfig, RenderedType,
    ResolverStub, Result, ServiceConfig, TypeKind, TypeRef,
};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;

struct ServiceEntry {
    config: ServiceConfig,
    composer: OnceCell<Arc<ServiceComposer>>,
}

/// Root type over several services
///
/// The root type is named after the prefix (e.g., "Aws") and has one field
/// per service (e.g., `s3: AwsS3`). Service composers are created on first
/// use and shared afterwards.
pub struct AwsApi {
    prefix: String,
    services: IndexMap<String, ServiceEntry>,
    composed: OnceCell<Arc<ObjectType>>,
    rendered: OnceCell<RenderedType>,
}

impl AwsApi {
    pub fn new(prefix: &str, services: IndexMap<String, ServiceConfig>) -> Self {
        let services = services
            .into_iter()
            .map(|(id, config)| {
                (
                    id,
                    ServiceEntry {
                        config,
                        composer: OnceCell::new(),
                    },
                )
            })
            .collect();

        Self {
            prefix: prefix.to_string(),
            services,
            composed: OnceCell::new(),
            rendered: OnceCell::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Root type name, the prefix itself
    pub fn type_name(&self) -> &str {
        &self.prefix
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.services.keys().map(String::as_str)
    }

    /// Composer for one service
    ///
    /// # Errors
    /// `ComposeError::ServiceNotFound` for an unknown service id
    pub fn get_service(&self, service_id: &str) -> Result<Arc<ServiceComposer>> {
        let (id, entry) = self
            .services
            .get_key_value(service_id)
            .ok_or_else(|| ComposeError::ServiceNotFound(service_id.to_string()))?;

        let composer = entry.composer.get_or_init(|| {
            tracing::debug!(service_id = %id, "Creating service composer");
            Arc::new(ServiceComposer::new(id, &self.prefix, entry.config.clone()))
        });
        Ok(Arc::clone(composer))
    }

    /// Root type with one field per service
    pub fn get_composed_type(&self) -> Result<Arc<ObjectType>> {
        self.composed
            .get_or_try_init(|| {
                let mut fields = IndexMap::new();
                for service_id in self.service_names() {
                    let service = self.get_service(service_id)?;
                    let description = Some(service.metadata().description())
                        .filter(|d| !d.is_empty())
                        .map(str::to_string);

                    fields.insert(
                        lower_first(service_id),
                        FieldConfig {
                            type_ref: TypeRef::named(service_type_name(&self.prefix, service_id))
                                .non_null(),
                            args: IndexMap::new(),
                            description,
                            resolver: Some(ResolverStub::Service {
                                service_id: service_id.to_string(),
                            }),
                        },
                    );
                }

                Ok(SchemaComposition.compose(ObjectTypeConfig {
                    name: self.type_name().to_string(),
                    kind: TypeKind::Object,
                    fields,
                    description: String::new(),
                }))
            })
            .map(Arc::clone)
    }

    /// Root type together with every service type and their shape types
    pub fn get_rendered_type(&self) -> Result<&RenderedType> {
        self.rendered.get_or_try_init(|| {
            let root = self.get_composed_type()?;
            let mut types = Vec::new();
            for service_id in self.service_names() {
                let service = self.get_service(service_id)?;
                let rendered = service.get_rendered_type()?;
                types.extend(rendered.all_types().cloned());
            }
            SchemaComposition.materialize(root, types)
        })
    }
}

impl std::fmt::Debug for AwsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsApi")
            .field("prefix", &self.prefix)
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(full_name: &str) -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.metadata.service_full_name = Some(full_name.to_string());
        config
    }

    fn api() -> AwsApi {
        let mut services = IndexMap::new();
        services.insert("s3".to_string(), config("Amazon Simple Storage Service"));
        services.insert("dynamodb".to_string(), config("Amazon DynamoDB"));
        AwsApi::new("Aws", services)
    }

    #[test]
    fn test_service_names_keep_order() {
        assert_eq!(api().service_names().collect::<Vec<_>>(), vec!["s3", "dynamodb"]);
    }

    #[test]
    fn test_get_service_is_cached() {
        let api = api();
        let first = api.get_service("s3").unwrap();
        let second = api.get_service("s3").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.type_name(), "AwsS3");
    }

    #[test]
    fn test_unknown_service() {
        let result = api().get_service("ec2");
        assert!(matches!(result, Err(ComposeError::ServiceNotFound(id)) if id == "ec2"));
    }

    #[test]
    fn test_root_type() {
        let api = api();
        let root = api.get_composed_type().unwrap();
        assert_eq!(root.name, "Aws");
        assert_eq!(root.field_names().collect::<Vec<_>>(), vec!["s3", "dynamodb"]);

        let s3 = root.field("s3").unwrap();
        assert_eq!(s3.type_ref.to_string(), "AwsS3!");
        assert_eq!(s3.description.as_deref(), Some("Amazon Simple Storage Service"));
        assert!(Arc::ptr_eq(&root, &api.get_composed_type().unwrap()));
    }

    #[test]
    fn test_rendered_type_includes_services() {
        let api = api();
        let rendered = api.get_rendered_type().unwrap();
        assert_eq!(rendered.root().name, "Aws");
        let names: Vec<&str> = rendered.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["AwsS3", "AwsDynamodb"]);
    }
}
