/// Vendor-neutral schema representation and GraphQL SDL generation
///
/// The representation is built once, by an adapter during introspection or
/// directly in tests, and read immutably by the generators.
mod generator;
mod representation;

pub use generator::generate_graphql_schema;
pub use representation::{
    DefaultKind, Engine, Field, FieldDefault, FieldType, Index, Model, Schema,
};
