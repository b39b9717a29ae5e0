use dotenvy::dotenv;
use tracing::{info, Level};

use deadline_tracker::{create_app, AppConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::from_env();
    info!(
        "Serving {} (repository link: {})",
        config.conferences_path().display(),
        config.github_repo_url
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server is running on http://{}", config.bind_addr);

    axum::serve(listener, create_app(config)).await
}
