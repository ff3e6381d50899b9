/// GraphQL SDL generation from the internal schema representation
///
/// This module renders a [`Schema`] as GraphQL type definitions annotated
/// with `@model`, `@primaryKey` and `@index` directives. Emission order is a
/// correctness requirement, not cosmetic: models and fields appear exactly
/// in the representation's insertion order so that snapshot-style consumers
/// and diffing see byte-identical output across runs.
use crate::schema::representation::{FieldType, Index, Model, Schema};

/// Render a schema as annotated GraphQL SDL.
///
/// Pure function: identical input always produces identical output.
pub fn generate_graphql_schema(schema: &Schema) -> String {
    let mut out = String::new();
    let mut enums: Vec<(String, Vec<String>)> = Vec::new();

    for model in schema.models() {
        out.push_str(&render_model(model, &mut enums));
        out.push('\n');
    }

    for (name, values) in enums {
        out.push_str(&format!("enum {} {{\n", name));
        for value in values {
            out.push_str(&format!("  {}\n", value));
        }
        out.push_str("}\n\n");
    }

    out
}

fn render_model(model: &Model, enums: &mut Vec<(String, Vec<String>)>) -> String {
    let mut out = format!("type {} @model {{\n", model.name);

    for field in model.fields() {
        collect_enums(&field.ty, enums);

        let mut line = format!("  {}: {}", field.name, field.ty.render());
        if let Some(pk) = model.primary_key() {
            if pk.fields.first().map(String::as_str) == Some(field.name.as_str()) {
                line.push_str(&render_primary_key_directive(pk));
            }
        }
        for index in model.indexes() {
            if index.fields.first().map(String::as_str) == Some(field.name.as_str()) {
                line.push_str(&render_index_directive(index));
            }
        }
        line.push('\n');
        out.push_str(&line);
    }

    out.push_str("}\n");
    out
}

/// `@primaryKey`, with `sortKeyFields` listing the range components in
/// declared order when the key is composite.
fn render_primary_key_directive(pk: &Index) -> String {
    if pk.fields.len() > 1 {
        format!(
            " @primaryKey(sortKeyFields: [{}])",
            quote_list(&pk.fields[1..])
        )
    } else {
        " @primaryKey".to_string()
    }
}

fn render_index_directive(index: &Index) -> String {
    if index.fields.len() > 1 {
        format!(
            " @index(name: \"{}\", sortKeyFields: [{}])",
            index.name,
            quote_list(&index.fields[1..])
        )
    } else {
        format!(" @index(name: \"{}\")", index.name)
    }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect_enums(ty: &FieldType, enums: &mut Vec<(String, Vec<String>)>) {
    match ty {
        FieldType::Enum { name, values } => {
            if !enums.iter().any(|(n, _)| n == name) {
                enums.push((name.clone(), values.clone()));
            }
        }
        FieldType::NonNull(inner) | FieldType::List(inner) => collect_enums(inner, enums),
        FieldType::Scalar(_) => {}
    }
}
