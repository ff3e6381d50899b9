use graphsmith::error::{GraphsmithError, Result};
use graphsmith::transformer::{ModelTransformer, QueryTransformer, ResolverOutput};

/// Run the compile command: parse an annotated GraphQL schema and write one
/// mapping-template file per generated resolver function.
pub async fn run(schema_path: String, out_dir: String, sync_enabled: bool) -> Result<()> {
    tracing::info!("📖 Reading schema from {}", schema_path);
    let sdl = std::fs::read_to_string(&schema_path)?;

    let document = async_graphql::parser::parse_schema(&sdl)
        .map_err(|e| GraphsmithError::Parse(e.to_string()))?;

    let mut models = ModelTransformer::new();
    models.scan(&document)?;
    let mut queries = QueryTransformer::new();
    queries.scan(&document)?;

    let model_count = models.configs().count();
    let query_count = queries.queries().count();
    tracing::info!(
        "🔧 Compiling resolvers for {} model(s) and {} raw quer(ies)...",
        model_count,
        query_count
    );

    let mut output = ResolverOutput::new();
    models.generate(&mut output, sync_enabled)?;
    queries.generate(&mut output, sync_enabled)?;

    std::fs::create_dir_all(&out_dir)?;
    let templates = output.templates();
    for (name, template) in &templates {
        let path = std::path::Path::new(&out_dir).join(format!("{}.vtl", name));
        std::fs::write(&path, template)?;
    }

    tracing::info!(
        "✅ Wrote {} template file(s) to {}",
        templates.len(),
        out_dir
    );
    for (key, resolver) in output.resolvers() {
        tracing::info!("   • {} -> {}", key, resolver.data_source);
    }

    Ok(())
}
