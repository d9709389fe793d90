use std::sync::Arc;

use clap::{Parser, Subcommand};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use meal4you_proto::recommender_service::recommender_service_server::RecommenderServiceServer;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meal4you_recommender_service::config::Config;
use meal4you_recommender_service::error::RecommenderError;
use meal4you_recommender_service::establish_connection;
use meal4you_recommender_service::service::RecommenderServiceImpl;
use meal4you_recommender_service::snapshot::PgSnapshotSource;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations, then serve the gRPC API
    Rpc,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match &cli.command {
        Commands::Migrate => run_migrations(&config)?,
        Commands::Rpc => {
            run_migrations(&config)?;
            serve(config).await?;
        }
    }

    Ok(())
}

fn run_migrations(config: &Config) -> Result<(), RecommenderError> {
    let mut conn = establish_connection(&config.database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RecommenderError::Migration(e.to_string()))?;
    info!(applied = applied.len(), "migrations up to date");
    Ok(())
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let source = PgSnapshotSource::new(config.database_url);
    let recommender_service = RecommenderServiceImpl::new(Arc::new(source));

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<RecommenderServiceServer<RecommenderServiceImpl>>()
        .await;

    info!("listening on {}", config.rpc_listen_addr);

    Server::builder()
        .add_service(health_service)
        .add_service(RecommenderServiceServer::new(recommender_service))
        .serve(config.rpc_listen_addr)
        .await?;

    Ok(())
}
