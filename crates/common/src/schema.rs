//! Schema type model
//!
//! The composer produces these types; the renderer turns them into SDL.
//! Object types reference each other by name through [`TypeRef::Named`], which
//! keeps recursive shapes representable without ownership cycles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scalar {
    String,
    Int,
    Float,
    Boolean,
    /// Arbitrary JSON value, used for maps and opaque shapes
    Json,
}

impl Scalar {
    /// SDL name of the scalar
    pub fn name(&self) -> &'static str {
        match self {
            Scalar::String => "String",
            Scalar::Int => "Int",
            Scalar::Float => "Float",
            Scalar::Boolean => "Boolean",
            Scalar::Json => "JSON",
        }
    }

    /// Whether the scalar has to be declared in SDL (not built into GraphQL)
    pub fn is_custom(&self) -> bool {
        matches!(self, Scalar::Json)
    }
}

/// Reference to a field or argument type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Scalar(Scalar),
    /// Object or input object type, by name
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Wrap in non-null; already non-null references are returned unchanged
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Innermost named type, skipping list and non-null wrappers
    pub fn named_type(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Scalar(_) => None,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    /// Innermost scalar, skipping list and non-null wrappers
    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            TypeRef::Scalar(scalar) => Some(*scalar),
            TypeRef::Named(_) => None,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.scalar(),
        }
    }
}

impl From<Scalar> for TypeRef {
    fn from(scalar: Scalar) -> Self {
        TypeRef::Scalar(scalar)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(scalar) => write!(f, "{}", scalar.name()),
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// Object or input object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Object,
    InputObject,
}

/// Handle naming the SDK call a field resolves through
///
/// Invocation is left to the host application; the stub only records what
/// to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolverStub {
    /// Invoke `operation` on `service_id`
    Operation {
        service_id: String,
        operation: String,
    },
    /// Resolve to the service's own type (root fields)
    Service { service_id: String },
}

/// Argument of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentConfig {
    pub type_ref: TypeRef,
    pub description: Option<String>,
}

/// Field of an object or input object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub type_ref: TypeRef,

    #[serde(default)]
    pub args: IndexMap<String, ArgumentConfig>,

    pub description: Option<String>,

    /// Only set on fields that map to an SDK call
    pub resolver: Option<ResolverStub>,
}

impl FieldConfig {
    /// Plain data field without arguments or resolver
    pub fn new(type_ref: TypeRef, description: Option<String>) -> Self {
        Self {
            type_ref,
            args: IndexMap::new(),
            description,
            resolver: None,
        }
    }
}

/// Input to the composition layer: `{name, fields, description}`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeConfig {
    pub name: String,
    pub kind: TypeKind,
    pub fields: IndexMap<String, FieldConfig>,
    /// Empty when the source has no description
    pub description: String,
}

/// A composed object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub kind: TypeKind,
    pub fields: IndexMap<String, FieldConfig>,
    pub description: Option<String>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Every type reference used by fields and arguments
    pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        self.fields.values().flat_map(|field| {
            std::iter::once(&field.type_ref).chain(field.args.values().map(|arg| &arg.type_ref))
        })
    }
}

impl From<ObjectTypeConfig> for ObjectType {
    fn from(config: ObjectTypeConfig) -> Self {
        let description = Some(config.description)
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        ObjectType {
            name: config.name,
            kind: config.kind,
            fields: config.fields,
            description,
        }
    }
}

/// A composed type together with every named type it reaches
#[derive(Debug, Clone)]
pub struct RenderedType {
    root: Arc<ObjectType>,
    types: Vec<Arc<ObjectType>>,
}

impl RenderedType {
    /// `types` must not contain `root`; callers validate references beforehand
    pub fn new(root: Arc<ObjectType>, types: Vec<Arc<ObjectType>>) -> Self {
        Self { root, types }
    }

    pub fn root(&self) -> &Arc<ObjectType> {
        &self.root
    }

    /// Dependent types, excluding the root
    pub fn types(&self) -> &[Arc<ObjectType>] {
        &self.types
    }

    /// Root followed by every dependent type
    pub fn all_types(&self) -> impl Iterator<Item = &Arc<ObjectType>> {
        std::iter::once(&self.root).chain(self.types.iter())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ObjectType>> {
        self.all_types().find(|t| t.name == name)
    }

    /// Custom scalars referenced anywhere in the type graph
    pub fn custom_scalars(&self) -> Vec<Scalar> {
        let mut scalars: Vec<Scalar> = Vec::new();
        for scalar in self
            .all_types()
            .flat_map(|t| t.type_refs())
            .filter_map(TypeRef::scalar)
            .filter(Scalar::is_custom)
        {
            if !scalars.contains(&scalar) {
                scalars.push(scalar);
            }
        }
        scalars
    }
}
