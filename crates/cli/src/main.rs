use crate::{
    commands::{Commands, ConfigArgs},
    error::CliError,
};
use clap::Parser;
use filters::{Compiler, FilterConfig};
use query::connection::LiveConnection;
use tracing::info;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "afilter", version = filters::VERSION, about = "Filter expression compiler")]
struct Cli {
    #[arg(short, long, global = true, help = "Log progress to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Initialize logger
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile {
            column,
            expression,
            options,
            database_url,
            json,
        } => {
            let config = load_config(&options).await?;
            let connection = match &database_url {
                Some(url) => Some(connectors::connect(url).await?),
                None => None,
            };
            let connection = connection.as_deref();

            let compiler = Compiler::default();
            let tree = compiler
                .compile(&column, &expression, &config, connection)
                .await?;
            let dialect = compiler.dialect(&config, connection)?;
            let rendered = tree.render(dialect.as_ref())?;

            output::print_compiled(dialect.name(), rendered, json)?;
        }
        Commands::Tokenize {
            expression,
            options,
        } => {
            let config = load_config(&options).await?;
            let parsed = config.tokenizer().tokenize(&expression);
            output::print_tokens(&parsed);
        }
        Commands::TestConn { database_url } => {
            let connection = connectors::connect(&database_url).await?;
            connection.probe("SELECT 1", &[]).await?;
            info!(driver = connection.driver_name(), "Connection test succeeded");
            println!("ok ({})", connection.driver_name());
        }
    }

    Ok(())
}

/// Layers the optional JSON config file over the defaults, then applies the
/// command-line flags.
async fn load_config(args: &ConfigArgs) -> Result<FilterConfig, CliError> {
    let base = match &args.config {
        Some(path) => {
            info!(path, "Loading filter configuration");
            let source = tokio::fs::read_to_string(path).await?;
            FilterConfig::from_json(&source)?
        }
        None => FilterConfig::default(),
    };

    Ok(base.merged(&args.overrides()))
}
