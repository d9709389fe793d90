use dotenvy::dotenv;
use meal4you_proto::recommender_service::recommender_service_client::RecommenderServiceClient;
use tracing::info;

mod error;
mod handlers;
mod models;

use handlers::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let recommender_service_endpoint = std::env::var("RECOMMENDER_SERVICE_ENDPOINT")
        .map_err(|_| "RECOMMENDER_SERVICE_ENDPOINT required")?;
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8100".to_string());

    let recommender_client = RecommenderServiceClient::connect(recommender_service_endpoint).await?;

    let app = handlers::app(AppState { recommender_client });

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("API Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
