//! Template loading and management

use aws_schema_composer_common::{ComposeError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const SCHEMA_TEMPLATE: &str = "schema.graphql";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("block_string", block_string_filter);

    tera.add_raw_template(
        SCHEMA_TEMPLATE,
        include_str!("../templates/schema.graphql.tera"),
    )
    .map_err(|e| ComposeError::Render(format!("Failed to load schema template: {}", e)))?;

    Ok(tera)
}

/// Escape triple quotes so the text fits in a GraphQL block string
fn block_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("block_string filter expects a string"))?;

    Ok(Value::String(escape_block_string(s)))
}

pub(crate) fn escape_block_string(s: &str) -> String {
    s.replace("\"\"\"", "\\\"\"\"")
}
