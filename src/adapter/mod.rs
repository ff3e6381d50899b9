/// Data-source introspection adapters
///
/// An adapter supplies the engine-specific introspection primitives; the
/// fixed `get_models` algorithm that assembles them into a [`Schema`] lives
/// here as a free function so implementations cannot override it.
mod mysql;

pub use mysql::{ConnectionConfig, MySqlDataSourceAdapter};

use crate::error::Result;
use crate::schema::{Engine, Field, FieldDefault, Index, Model, Schema};

/// One raw column row as the store reports it, before type mapping.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub raw_type: String,
    pub nullable: bool,
    pub default: Option<FieldDefault>,
}

/// Engine-specific introspection primitives.
///
/// Implementations may fail with a database error at any point; introspection
/// is all-or-nothing and nothing retries at this layer.
pub trait DataSourceAdapter {
    fn engine(&self) -> Engine;

    /// Open connections / sessions. Must be called before introspection.
    async fn initialize(&mut self) -> Result<()>;

    /// Table names, case-preserving, in the order the store returns them.
    async fn get_tables_list(&self) -> Result<Vec<String>>;

    /// Raw columns of one table in declaration order.
    async fn get_columns(&self, table_name: &str) -> Result<Vec<Column>>;

    /// Primary-key columns of one table in key order, when a primary key
    /// exists.
    async fn get_primary_key(&self, table_name: &str) -> Result<Option<Index>>;

    /// Secondary indexes of one table.
    async fn get_indexes(&self, table_name: &str) -> Result<Vec<Index>>;

    /// Map a raw column type to a GraphQL field type, wrapping in `NonNull`
    /// when the column is not nullable. Total over the engine's type
    /// vocabulary; each implementation documents its fallback.
    fn map_data_type(&self, raw_type: &str, nullable: bool) -> crate::schema::FieldType;

    /// Release connections. Safe to call more than once.
    fn cleanup(&mut self);
}

/// Fixed introspection algorithm over any adapter.
///
/// Calls `get_tables_list` exactly once, then `get_columns`,
/// `get_primary_key` and `get_indexes` exactly once per table, preserving
/// the store's table order as model insertion order. Any failure aborts
/// with no partial schema.
pub async fn get_models<A: DataSourceAdapter>(adapter: &A) -> Result<Schema> {
    let mut schema = Schema::new(adapter.engine());
    let tables = adapter.get_tables_list().await?;
    tracing::info!("introspecting {} tables", tables.len());

    for table_name in tables {
        let mut model = Model::new(&table_name);

        for column in adapter.get_columns(&table_name).await? {
            let ty = adapter.map_data_type(&column.raw_type, column.nullable);
            let mut field = Field::new(&column.name, ty);
            if let Some(default) = column.default {
                field = field.with_default(default);
            }
            model.add_field(field);
        }

        if let Some(pk) = adapter.get_primary_key(&table_name).await? {
            model.set_primary_key(pk.fields)?;
        }
        for index in adapter.get_indexes(&table_name).await? {
            model.add_index(&index.name, index.fields)?;
        }

        schema.add_model(model);
    }
    Ok(schema)
}
