/// Directive-to-resolver transformation
///
/// Schema visitation is split from generation: transformers first record
/// directive occurrences into insertion-ordered registries, then a pure
/// generation pass walks those registries and registers resolvers against
/// the external pipeline.
pub mod context;
pub mod directive;
mod model;
mod query;

pub use context::{DataSource, Resolver, ResolverOutput, TransformerContext};
pub use model::ModelTransformer;
pub use query::QueryTransformer;

/// Name of the shared proxy compute binding. Created lazily, exactly once.
pub const DATA_SOURCE_NAME: &str = "SqlProxyDataSource";

pub(crate) fn ensure_data_source(ctx: &mut impl TransformerContext) {
    if !ctx.has_data_source(DATA_SOURCE_NAME) {
        ctx.add_data_source(DataSource {
            name: DATA_SOURCE_NAME.to_string(),
        });
    }
}

/// Naive English pluralization for list/sync field names.
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        let penultimate = stem.chars().last().unwrap_or('a');
        if !matches!(penultimate, 'a' | 'e' | 'i' | 'o' | 'u') {
            return format!("{}ies", stem);
        }
    }
    if name.ends_with('s')
        || name.ends_with('x')
        || name.ends_with('z')
        || name.ends_with("ch")
        || name.ends_with("sh")
    {
        return format!("{}es", name);
    }
    format!("{}s", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Post"), "Posts");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Match"), "Matches");
    }
}
