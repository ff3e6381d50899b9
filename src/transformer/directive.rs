/// Directive configuration entities
///
/// Read-only views over directive arguments for a single (type) or
/// (type, field) occurrence. They compare by value so structurally equal
/// occurrences deduplicate instead of generating a resolver twice.
use async_graphql::parser::types::ConstDirective;
use async_graphql::Value as ConstValue;

/// Statement used when `@query` carries no argument: a no-op single-row
/// probe the proxy can always satisfy.
pub const DEFAULT_QUERY_STATEMENT: &str = "SELECT 1 as result";

/// Timestamp field names tracked by a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampConfig {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            created_at: Some("createdAt".to_string()),
            updated_at: Some("updatedAt".to_string()),
        }
    }
}

/// Arguments of one `@model` occurrence.
///
/// An absent `timestamps` argument means the default field names; an
/// explicit `timestamps: null` disables timestamp tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDirectiveConfig {
    pub timestamps: Option<TimestampConfig>,
}

impl Default for ModelDirectiveConfig {
    fn default() -> Self {
        Self {
            timestamps: Some(TimestampConfig::default()),
        }
    }
}

impl ModelDirectiveConfig {
    pub fn from_directive(directive: &ConstDirective) -> Self {
        let timestamps = match directive.get_argument("timestamps") {
            None => Some(TimestampConfig::default()),
            Some(value) => match &value.node {
                ConstValue::Null => None,
                ConstValue::Object(fields) => Some(TimestampConfig {
                    created_at: string_field(fields.get("createdAt")),
                    updated_at: string_field(fields.get("updatedAt")),
                }),
                _ => Some(TimestampConfig::default()),
            },
        };
        Self { timestamps }
    }
}

fn string_field(value: Option<&ConstValue>) -> Option<String> {
    match value {
        Some(ConstValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Arguments of one `@query` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDirectiveConfig {
    pub statement: String,
}

impl QueryDirectiveConfig {
    pub fn from_directive(directive: &ConstDirective) -> Self {
        let statement = match directive.get_argument("statement") {
            Some(value) => match &value.node {
                ConstValue::String(s) => s.clone(),
                _ => DEFAULT_QUERY_STATEMENT.to_string(),
            },
            None => DEFAULT_QUERY_STATEMENT.to_string(),
        };
        Self { statement }
    }
}

/// Identity of one (type, field) directive occurrence.
///
/// Derived equality and hashing are deliberate: dedup must be value-based,
/// not identity-based, so two structurally equal occurrences collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub type_name: String,
    pub field_name: String,
}

impl FieldRef {
    pub fn new(type_name: &str, field_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_schema;
    use async_graphql::parser::types::{TypeKind, TypeSystemDefinition};

    fn first_directive(sdl: &str) -> ConstDirective {
        let doc = parse_schema(sdl).unwrap();
        for def in &doc.definitions {
            if let TypeSystemDefinition::Type(ty) = def {
                if let Some(d) = ty.node.directives.first() {
                    return d.node.clone();
                }
                if let TypeKind::Object(object) = &ty.node.kind {
                    for field in &object.fields {
                        if let Some(d) = field.node.directives.first() {
                            return d.node.clone();
                        }
                    }
                }
            }
        }
        panic!("no directive in test SDL");
    }

    #[test]
    fn test_model_defaults_when_timestamps_absent() {
        let directive = first_directive("type Post @model { id: ID! }");
        let config = ModelDirectiveConfig::from_directive(&directive);
        let timestamps = config.timestamps.unwrap();
        assert_eq!(timestamps.created_at.as_deref(), Some("createdAt"));
        assert_eq!(timestamps.updated_at.as_deref(), Some("updatedAt"));
    }

    #[test]
    fn test_model_timestamps_null_disables_tracking() {
        let directive = first_directive("type Post @model(timestamps: null) { id: ID! }");
        let config = ModelDirectiveConfig::from_directive(&directive);
        assert!(config.timestamps.is_none());
    }

    #[test]
    fn test_model_custom_timestamp_fields() {
        let directive = first_directive(
            "type Post @model(timestamps: { createdAt: \"made\", updatedAt: \"touched\" }) { id: ID! }",
        );
        let config = ModelDirectiveConfig::from_directive(&directive);
        let timestamps = config.timestamps.unwrap();
        assert_eq!(timestamps.created_at.as_deref(), Some("made"));
        assert_eq!(timestamps.updated_at.as_deref(), Some("touched"));
    }

    #[test]
    fn test_query_statement_default() {
        let directive = first_directive("type Query { probe: String @query }");
        let config = QueryDirectiveConfig::from_directive(&directive);
        assert_eq!(config.statement, DEFAULT_QUERY_STATEMENT);
    }

    #[test]
    fn test_query_statement_literal() {
        let directive =
            first_directive("type Query { posts: String @query(statement: \"SELECT * FROM Posts\") }");
        let config = QueryDirectiveConfig::from_directive(&directive);
        assert_eq!(config.statement, "SELECT * FROM Posts");
    }

    #[test]
    fn test_field_ref_value_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(FieldRef::new("Query", "posts"));
        set.insert(FieldRef::new("Query", "posts"));
        assert_eq!(set.len(), 1);
    }
}
