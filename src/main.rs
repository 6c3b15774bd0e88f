use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use urbanisme_cms::{app, schema, seed, AppConfig, AppState, Catalog, Locale};

#[derive(Parser)]
#[command(name = "urbanisme-cms", version, about = "Content backend for the ministry of urbanism website")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Report missing content tables and columns.
    Check,
    /// Create missing content tables and columns.
    Migrate,
    /// Fill empty home page tables with the default content.
    Seed {
        /// Language of the seeded text.
        #[arg(long, default_value = "fr")]
        lang: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("urbanisme_cms=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match &config.models_path {
        Some(path) => Catalog::from_json_file(&config.content_schema, path).await?,
        None => Catalog::builtin(&config.content_schema)?,
    };
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let addr = format!("{}:{}", config.host, config.port);
            let state = AppState::new(pool, catalog, config);
            let listener = TcpListener::bind(&addr).await?;
            tracing::info!(models = state.catalog.models.len(), "listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app(state)).await?;
        }
        Command::Check => {
            let report = schema::check(&pool, &catalog).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_healthy() {
                std::process::exit(2);
            }
        }
        Command::Migrate => {
            let report = schema::repair(&pool, &catalog).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Seed { lang } => {
            let locale = Locale::from_tag(&lang).unwrap_or_default();
            let report = seed::seed(&pool, &catalog, locale).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
