use clap::{Parser, Subcommand};
use graphsmith::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "graphsmith")]
#[command(version = "0.1.0")]
#[command(about = "Turn relational databases into GraphQL APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Introspect a database and generate an annotated GraphQL schema
    Introspect {
        /// Config file path (ignored when --host is given)
        #[arg(long, default_value = "graphsmith.toml")]
        config: String,

        /// Database host (bypasses the config file)
        #[arg(long)]
        host: Option<String>,

        /// Database port
        #[arg(long, default_value_t = 3306)]
        port: u16,

        /// Database name (required with --host)
        #[arg(long, requires = "host")]
        database: Option<String>,

        /// Database username (required with --host)
        #[arg(long, requires = "host")]
        username: Option<String>,

        /// Database password (falls back to GRAPHSMITH_DB_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Output schema file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Compile an annotated GraphQL schema into resolver mapping templates
    Compile {
        /// Annotated GraphQL schema file
        #[arg(long)]
        schema: String,

        /// Directory to write the template files to
        #[arg(long, default_value = "resolvers")]
        out_dir: String,

        /// Also generate sync resolvers and conflict-aware templates
        #[arg(long)]
        sync: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Introspect {
            config,
            host,
            port,
            database,
            username,
            password,
            output,
        } => {
            let connection = cli::introspect::ConnectionArgs {
                host,
                port,
                database,
                username,
                password,
            };
            cli::introspect::run(config, connection, output).await?;
        }
        Commands::Compile {
            schema,
            out_dir,
            sync,
        } => {
            cli::compile::run(schema, out_dir, sync).await?;
        }
    }

    Ok(())
}
