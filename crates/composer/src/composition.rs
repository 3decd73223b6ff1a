//! Schema composition layer
//!
//! [`TypeComposition`] is the seam between the composers and the schema
//! layer: it turns `{name, fields, description}` into an object type and
//! materializes a root type with its dependencies.

use aws_schema_composer_common::{
    ComposeError, ObjectType, ObjectTypeConfig, RenderedType, Result, TypeKind, TypeRef,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
pub trait TypeComposition {
    /// Create an object type
    fn compose(&self, config: ObjectTypeConfig) -> Arc<ObjectType>;

    /// Collect every type reachable from `root` out of `types`
    fn materialize(
        &self,
        root: Arc<ObjectType>,
        types: Vec<Arc<ObjectType>>,
    ) -> Result<RenderedType>;
}

/// Default composition
///
/// Materialization walks the type graph from the root and rejects duplicate
/// names, dangling references, and object/input kind mismatches.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaComposition;

impl TypeComposition for SchemaComposition {
    fn compose(&self, config: ObjectTypeConfig) -> Arc<ObjectType> {
        Arc::new(config.into())
    }

    fn materialize(
        &self,
        root: Arc<ObjectType>,
        types: Vec<Arc<ObjectType>>,
    ) -> Result<RenderedType> {
        let mut by_name: HashMap<&str, &Arc<ObjectType>> = HashMap::new();
        by_name.insert(root.name.as_str(), &root);
        for t in &types {
            if let Some(existing) = by_name.insert(t.name.as_str(), t) {
                // The same Arc can legitimately arrive twice from overlapping sources
                if !Arc::ptr_eq(existing, t) {
                    return Err(ComposeError::Schema(format!(
                        "Type {} is defined more than once",
                        t.name
                    )));
                }
            }
        }

        let mut reachable: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&Arc<ObjectType>> = VecDeque::from([&root]);
        reachable.insert(root.name.as_str());

        while let Some(current) = queue.pop_front() {
            for (field_name, field) in &current.fields {
                // Object fields return objects, input object fields hold inputs
                check_reference(&by_name, current, field_name, &field.type_ref, current.kind)?;
                for (arg_name, arg) in &field.args {
                    check_reference(
                        &by_name,
                        current,
                        &format!("{}({})", field_name, arg_name),
                        &arg.type_ref,
                        TypeKind::InputObject,
                    )?;
                }

                let referenced = std::iter::once(&field.type_ref)
                    .chain(field.args.values().map(|a| &a.type_ref))
                    .filter_map(|r| r.named_type());
                for name in referenced {
                    if reachable.insert(name) {
                        if let Some(&t) = by_name.get(name) {
                            queue.push_back(t);
                        }
                    }
                }
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let dependencies: Vec<Arc<ObjectType>> = types
            .iter()
            .filter(|t| t.name != root.name && reachable.contains(t.name.as_str()))
            .filter(|t| seen.insert(t.name.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            root = %root.name,
            types = dependencies.len(),
            "Materialized type"
        );
        Ok(RenderedType::new(Arc::clone(&root), dependencies))
    }
}

fn check_reference(
    by_name: &HashMap<&str, &Arc<ObjectType>>,
    owner: &ObjectType,
    location: &str,
    type_ref: &TypeRef,
    expected: TypeKind,
) -> Result<()> {
    let Some(name) = type_ref.named_type() else {
        return Ok(());
    };

    match by_name.get(name) {
        None => Err(ComposeError::Schema(format!(
            "{}.{} references unknown type {}",
            owner.name, location, name
        ))),
        Some(target) if target.kind != expected => Err(ComposeError::Schema(format!(
            "{}.{} references {} of kind {:?}, expected {:?}",
            owner.name, location, name, target.kind, expected
        ))),
        Some(_) => Ok(()),
    }
}
