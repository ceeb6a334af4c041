// HTTP API server binary for the movie dataset

use anyhow::Result;
use clap::Parser;
use movie_api::api::ApiServer;
use movie_api::config::MovieConfig;
use movie_api::db::SqliteDatabase;
use movie_api::logging::init_tracing;
use movie_api::movies::MovieService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "api_server", version, about = "Read-only movie and ratings HTTP API")]
struct Cli {
    /// Override HOST
    #[arg(long)]
    host: Option<String>,
    /// Override PORT
    #[arg(long)]
    port: Option<u16>,
    /// Override MOVIE_DB_PATH
    #[arg(long)]
    movie_db: Option<PathBuf>,
    /// Override RATINGS_DB_PATH
    #[arg(long)]
    ratings_db: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut MovieConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.movie_db {
            config.database.movie_db_path = path;
        }
        if let Some(path) = self.ratings_db {
            config.database.ratings_db_path = path;
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so RUST_LOG from .env is visible to the filter.
    let mut config = MovieConfig::from_env()?;
    init_tracing("info,sqlx=warn")?;
    cli.apply(&mut config);

    tracing::info!("Initializing movie API server");

    let db = SqliteDatabase::connect(&config.database).await?;
    let service = MovieService::new(Arc::new(db), config.default_limit);

    ApiServer::new(config).run(service).await
}
