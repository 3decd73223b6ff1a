//! Shape-to-type resolution
//!
//! Maps AWS shapes onto schema types:
//! - string, character, timestamp, blob → `String`
//! - integer → `Int`
//! - long, float, double, big numbers → `Float`
//! - boolean → `Boolean`
//! - list → list of the member type
//! - map, memberless structures, unknown shapes → `JSON`
//! - structure → named object type `<prefix><Shape>` (output) or
//!   `<prefix><Shape>Input` (input)
//!
//! Every resolution is memoized per (shape, usage), so the same shape always
//! yields the same type reference and the same `Arc<ObjectType>`.

use aws_schema_composer_common::{
    upper_first, FieldConfig, ObjectType, Scalar, ShapeConfig, ShapesMap, TypeKind, TypeRef,
};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whether a shape is resolved as an argument or as a returned value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeUsage {
    Input,
    Output,
}

impl ShapeUsage {
    fn kind(self) -> TypeKind {
        match self {
            ShapeUsage::Input => TypeKind::InputObject,
            ShapeUsage::Output => TypeKind::Object,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ShapeUsage::Input => "Input",
            ShapeUsage::Output => "",
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    refs: HashMap<(String, ShapeUsage), TypeRef>,
    types: IndexMap<String, Arc<ObjectType>>,
    /// Type names handed out, including those still being built
    reserved: HashSet<String>,
    /// Non-structure shapes currently on the resolution stack
    visiting: HashSet<(String, ShapeUsage)>,
}

/// Lazily resolves the shapes of one service into schema types
#[derive(Debug)]
pub struct ShapeRegistry {
    shapes: ShapesMap,
    prefix: String,
    state: Mutex<RegistryState>,
}

impl ShapeRegistry {
    /// `prefix` namespaces every generated type name (usually the service type name)
    pub fn new(shapes: ShapesMap, prefix: impl Into<String>) -> Self {
        Self {
            shapes,
            prefix: prefix.into(),
            state: Mutex::new(RegistryState::default()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn shape(&self, name: &str) -> Option<&ShapeConfig> {
        self.shapes.get(name)
    }

    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Type of a value returned by an operation
    pub fn output_type(&self, shape_name: &str) -> TypeRef {
        self.resolve(shape_name, ShapeUsage::Output)
    }

    /// Type of an operation argument
    pub fn input_type(&self, shape_name: &str) -> TypeRef {
        self.resolve(shape_name, ShapeUsage::Input)
    }

    pub fn resolve(&self, shape_name: &str, usage: ShapeUsage) -> TypeRef {
        let mut state = self.lock();
        Resolver {
            shapes: &self.shapes,
            prefix: &self.prefix,
            state: &mut state,
        }
        .resolve(shape_name, usage)
    }

    /// Whether the shape is a structure with at least one required member
    pub fn has_required_members(&self, shape_name: &str) -> bool {
        matches!(
            self.shapes.get(shape_name),
            Some(ShapeConfig::Structure { members, required, .. })
                if required.iter().any(|r| members.contains_key(r))
        )
    }

    /// Object type built for `type_name`, if it has been resolved
    pub fn object_type(&self, type_name: &str) -> Option<Arc<ObjectType>> {
        self.lock().types.get(type_name).cloned()
    }

    /// Every object type resolved so far, dependencies first
    pub fn types(&self) -> Vec<Arc<ObjectType>> {
        self.lock().types.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Recursive resolution over locked registry state
struct Resolver<'a> {
    shapes: &'a ShapesMap,
    prefix: &'a str,
    state: &'a mut RegistryState,
}

impl Resolver<'_> {
    fn resolve(&mut self, shape_name: &str, usage: ShapeUsage) -> TypeRef {
        let key = (shape_name.to_string(), usage);
        if let Some(type_ref) = self.state.refs.get(&key) {
            return type_ref.clone();
        }

        let shapes = self.shapes;
        let Some(shape) = shapes.get(shape_name) else {
            tracing::warn!(shape = shape_name, "Unknown shape, falling back to JSON");
            return self.remember(key, Scalar::Json.into());
        };

        let type_ref = match shape {
            ShapeConfig::String { .. }
            | ShapeConfig::Character { .. }
            | ShapeConfig::Timestamp { .. }
            | ShapeConfig::Blob { .. } => Scalar::String.into(),
            ShapeConfig::Integer { .. } => Scalar::Int.into(),
            ShapeConfig::Long { .. }
            | ShapeConfig::Float { .. }
            | ShapeConfig::Double { .. }
            | ShapeConfig::BigInteger { .. }
            | ShapeConfig::BigDecimal { .. } => Scalar::Float.into(),
            ShapeConfig::Boolean { .. } => Scalar::Boolean.into(),
            ShapeConfig::Map { .. } | ShapeConfig::Other => Scalar::Json.into(),
            ShapeConfig::List { member, .. } => {
                // A list reaching itself without passing through a structure
                if !self.state.visiting.insert(key.clone()) {
                    return Scalar::Json.into();
                }
                let inner = self.resolve(&member.shape, usage);
                self.state.visiting.remove(&key);
                TypeRef::list(inner)
            }
            ShapeConfig::Structure {
                members,
                required,
                documentation,
            } => {
                if members.is_empty() {
                    Scalar::Json.into()
                } else {
                    let type_name = self.reserve_name(shape_name, usage);
                    let type_ref = self.remember(key, TypeRef::named(type_name.as_str()));

                    // Lists above this structure are not part of a list-only cycle
                    let outer_lists = std::mem::take(&mut self.state.visiting);

                    let mut fields = IndexMap::new();
                    for (member_name, member) in members {
                        let mut member_type = self.resolve(&member.shape, usage);
                        if usage == ShapeUsage::Input && required.contains(member_name) {
                            member_type = member_type.non_null();
                        }
                        let description = trimmed_description(member.documentation.as_deref())
                            .or_else(|| {
                                trimmed_description(
                                    shapes
                                        .get(&member.shape)
                                        .and_then(ShapeConfig::documentation),
                                )
                            });
                        fields.insert(
                            member_name.clone(),
                            FieldConfig::new(member_type, description),
                        );
                    }

                    self.state.visiting = outer_lists;

                    tracing::trace!(
                        type_name = %type_name,
                        fields = fields.len(),
                        "Resolved structure"
                    );
                    self.state.types.insert(
                        type_name.clone(),
                        Arc::new(ObjectType {
                            name: type_name,
                            kind: usage.kind(),
                            fields,
                            description: trimmed_description(documentation.as_deref()),
                        }),
                    );
                    return type_ref;
                }
            }
        };

        self.remember(key, type_ref)
    }

    fn remember(&mut self, key: (String, ShapeUsage), type_ref: TypeRef) -> TypeRef {
        self.state.refs.insert(key, type_ref.clone());
        type_ref
    }

    /// Unique type name for a structure shape
    fn reserve_name(&mut self, shape_name: &str, usage: ShapeUsage) -> String {
        let sanitized: String = shape_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        let base = format!("{}{}{}", self.prefix, upper_first(&sanitized), usage.suffix());

        let mut name = base.clone();
        let mut counter = 2;
        while !self.state.reserved.insert(name.clone()) {
            name = format!("{}{}", base, counter);
            counter += 1;
        }
        name
    }
}

/// Trimmed documentation, `None` when blank
pub(crate) fn trimmed_description(documentation: Option<&str>) -> Option<String> {
    documentation
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
