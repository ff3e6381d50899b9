use graphsmith::adapter::{
    get_models, ConnectionConfig, DataSourceAdapter, MySqlDataSourceAdapter,
};
use graphsmith::error::{GraphsmithError, Result};
use graphsmith::schema::generate_graphql_schema;

/// Connection parameters passed directly on the command line, bypassing the
/// config file when `host` is present.
pub struct ConnectionArgs {
    pub host: Option<String>,
    pub port: u16,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Run the introspect command: connect to the database, read its catalog
/// and emit an annotated GraphQL schema.
pub async fn run(
    config_path: String,
    connection: ConnectionArgs,
    output: Option<String>,
) -> Result<()> {
    let config = resolve_connection(&config_path, connection)?;

    let mut adapter = MySqlDataSourceAdapter::new(config);

    tracing::info!("🔍 Introspecting {} database...", adapter.engine());
    adapter.initialize().await?;

    let schema = get_models(&adapter).await?;
    adapter.cleanup();

    let model_count = schema.models().count();
    tracing::info!("✅ Found {} table(s)", model_count);
    for model in schema.models() {
        tracing::info!("   • {}", model.name);
    }

    let sdl = generate_graphql_schema(&schema);

    if let Some(output_path) = output {
        std::fs::write(&output_path, &sdl)?;
        tracing::info!("📝 Wrote schema to {}", output_path);
        tracing::info!("");
        tracing::info!("💡 Next steps:");
        tracing::info!("   1. Review the generated schema and adjust directives");
        tracing::info!(
            "   2. Compile resolvers with 'graphsmith compile --schema {}'",
            output_path
        );
    } else {
        println!("{}", sdl);
    }

    Ok(())
}

fn resolve_connection(config_path: &str, connection: ConnectionArgs) -> Result<ConnectionConfig> {
    if let Some(host) = connection.host {
        let database = connection.database.ok_or_else(|| {
            GraphsmithError::Config("--database is required with --host".to_string())
        })?;
        let username = connection.username.ok_or_else(|| {
            GraphsmithError::Config("--username is required with --host".to_string())
        })?;
        let password = connection
            .password
            .or_else(|| std::env::var("GRAPHSMITH_DB_PASSWORD").ok())
            .unwrap_or_default();
        return Ok(ConnectionConfig {
            host,
            database,
            port: connection.port,
            username,
            password,
        });
    }

    tracing::info!("📖 Loading configuration from {}", config_path);
    let config = graphsmith::config::load_config(config_path)?;
    Ok(config.database.to_connection_config())
}
