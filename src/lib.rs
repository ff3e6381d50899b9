pub mod adapter;
pub mod config;
pub mod error;
pub mod resolvers;
pub mod schema;
pub mod transformer;
pub mod vtl;

// Re-export commonly used types
pub use config::{CodegenConfig, Config, DatabaseConfig};
pub use error::{GraphsmithError, Result};
pub use schema::{generate_graphql_schema, Schema};
pub use transformer::{ModelTransformer, QueryTransformer, ResolverOutput};
