//! GraphQL SDL rendering
//!
//! Turns a [`RenderedType`] (a composed root type plus every type it
//! references) into SDL text. Custom scalars are declared first, then the
//! root type, then its dependencies.

mod templates;

use aws_schema_composer_common::{
    ComposeError, FieldConfig, ObjectType, RenderedType, Result, TypeKind,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

#[derive(Serialize)]
struct TypeContext {
    keyword: &'static str,
    name: String,
    description: Option<String>,
    fields: Vec<FieldContext>,
}

#[derive(Serialize)]
struct FieldContext {
    /// Field description, indented to field level
    description: Option<String>,
    /// `name(args): Type`
    signature: String,
}

/// SDL renderer
pub struct SdlRenderer {
    tera: Tera,
}

impl SdlRenderer {
    pub fn new() -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { tera })
    }

    /// Render a type and its dependencies to SDL
    pub fn render(&self, rendered: &RenderedType) -> Result<String> {
        let context = self.create_context(rendered);
        self.tera
            .render(templates::SCHEMA_TEMPLATE, &context)
            .map_err(|e| ComposeError::Render(format!("Template error: {:?}", e)))
    }

    /// Render to `<output_dir>/<RootName>.graphql`, returning the written path
    pub fn render_to_directory(&self, rendered: &RenderedType, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir).map_err(|e| {
            ComposeError::Render(format!("Failed to create output directory: {}", e))
        })?;

        let sdl = self.render(rendered)?;
        let output_path = output_dir.join(format!("{}.graphql", rendered.root().name));
        fs::write(&output_path, sdl).map_err(|e| {
            ComposeError::Render(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::debug!("Wrote {}", output_path.display());
        Ok(output_path)
    }

    fn create_context(&self, rendered: &RenderedType) -> tera::Context {
        let scalars: Vec<&str> = rendered
            .custom_scalars()
            .iter()
            .map(|s| s.name())
            .collect();
        let types: Vec<TypeContext> = rendered
            .all_types()
            .map(|t| type_context(t))
            .collect();

        let mut context = tera::Context::new();
        context.insert("scalars", &scalars);
        context.insert("types", &types);
        context
    }
}

fn type_context(object: &ObjectType) -> TypeContext {
    let fields = object
        .fields
        .iter()
        .map(|(name, field)| FieldContext {
            description: field.description.as_deref().map(|d| indent(d, "  ")),
            signature: field_definition(name, field),
        })
        .collect();

    TypeContext {
        keyword: match object.kind {
            TypeKind::Object => "type",
            TypeKind::InputObject => "input",
        },
        name: object.name.clone(),
        description: object.description.clone(),
        fields,
    }
}

/// SDL field line without indentation, e.g. `getObject(input: AwsS3GetObjectRequestInput!): AwsS3GetObjectOutput`
pub fn field_signature(name: &str, field: &FieldConfig) -> String {
    if field.args.is_empty() {
        return format!("{}: {}", name, field.type_ref);
    }

    let args: Vec<String> = field
        .args
        .iter()
        .map(|(arg_name, arg)| format!("{}: {}", arg_name, arg.type_ref))
        .collect();
    format!("{}({}): {}", name, args.join(", "), field.type_ref)
}

/// Field definition as placed after the two-space field indent
///
/// Falls back to [`field_signature`] unless an argument carries a
/// description, in which case each argument goes on its own line preceded by
/// its block string.
fn field_definition(name: &str, field: &FieldConfig) -> String {
    if field.args.values().all(|arg| arg.description.is_none()) {
        return field_signature(name, field);
    }

    let mut lines = vec![format!("{}(", name)];
    for (arg_name, arg) in &field.args {
        if let Some(description) = &arg.description {
            lines.push("    \"\"\"".to_string());
            lines.push(indent(&templates::escape_block_string(description), "    "));
            lines.push("    \"\"\"".to_string());
        }
        lines.push(format!("    {}: {}", arg_name, arg.type_ref));
    }
    lines.push(format!("  ): {}", field.type_ref));
    lines.join("\n")
}

fn indent(text: &str, prefix: &str) -> String {
    text.trim()
        .lines()
        .map(|line| format!("{}{}", prefix, line.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a type to SDL (convenience function)
pub fn render_sdl(rendered: &RenderedType) -> Result<String> {
    SdlRenderer::new()?.render(rendered)
}
