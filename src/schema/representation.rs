use crate::error::{GraphsmithError, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Source relational engine tag.
///
/// Attached to a [`Schema`] at construction time and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Engine {
    MySql,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::MySql => write!(f, "MySQL"),
        }
    }
}

/// GraphQL-shaped field type.
///
/// `NonNull` and `List` wrap exactly one inner type; nesting is finite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Scalar(String),
    NonNull(Box<FieldType>),
    List(Box<FieldType>),
    Enum { name: String, values: Vec<String> },
}

impl FieldType {
    pub fn scalar(name: &str) -> Self {
        FieldType::Scalar(name.to_string())
    }

    pub fn non_null(inner: FieldType) -> Self {
        FieldType::NonNull(Box::new(inner))
    }

    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    /// Render as GraphQL SDL type syntax (e.g. `String`, `Int!`, `[Tag!]`).
    pub fn render(&self) -> String {
        match self {
            FieldType::Scalar(name) => name.clone(),
            FieldType::NonNull(inner) => format!("{}!", inner.render()),
            FieldType::List(inner) => format!("[{}]", inner.render()),
            FieldType::Enum { name, .. } => name.clone(),
        }
    }
}

/// How a column default is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DefaultKind {
    /// A literal value callers could also supply themselves.
    Literal,
    /// Computed by the store (auto increment, CURRENT_TIMESTAMP, uuid()).
    DbGenerated,
}

/// Default-value descriptor for a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefault {
    pub kind: DefaultKind,
    pub value: String,
}

/// A single column of a [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub default: Option<FieldDefault>,
}

impl Field {
    pub fn new(name: &str, ty: FieldType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }
}

/// An ordered sequence of field names forming a key.
///
/// Order is semantically significant: the first field is the partition/hash
/// component, the remainder are sort/range components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
}

impl Index {
    pub fn new(name: &str, fields: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }
}

/// A table-shaped type: ordered fields, at most one primary key, zero or
/// more secondary indexes keyed by name.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub name: String,
    fields: IndexMap<String, Field>,
    primary_key: Option<Index>,
    indexes: IndexMap<String, Index>,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: IndexMap::new(),
            primary_key: None,
            indexes: IndexMap::new(),
        }
    }

    /// Add a field. Insertion order is preserved and reproduced verbatim in
    /// generated output.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Set the primary key. Every referenced field must already exist.
    pub fn set_primary_key(&mut self, field_names: Vec<String>) -> Result<()> {
        self.check_fields_exist(&field_names)?;
        self.primary_key = Some(Index::new("PRIMARY_KEY", field_names));
        Ok(())
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.primary_key.as_ref()
    }

    /// Attach a secondary index. Every referenced field must already exist.
    pub fn add_index(&mut self, name: &str, field_names: Vec<String>) -> Result<()> {
        self.check_fields_exist(&field_names)?;
        self.indexes
            .insert(name.to_string(), Index::new(name, field_names));
        Ok(())
    }

    /// Secondary indexes in attachment order.
    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values()
    }

    fn check_fields_exist(&self, field_names: &[String]) -> Result<()> {
        for name in field_names {
            if !self.fields.contains_key(name) {
                return Err(GraphsmithError::InvalidKey {
                    model: self.name.clone(),
                    field: name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Root aggregate: an engine tag plus an ordered collection of models.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub engine: Engine,
    models: IndexMap<String, Model>,
}

impl Schema {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            models: IndexMap::new(),
        }
    }

    pub fn add_model(&mut self, model: Model) {
        self.models.insert(model.name.clone(), model);
    }

    /// Models in insertion order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }
}
