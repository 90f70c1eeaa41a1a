use axum::http::Method;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod middleware;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("survey_portal=info,tower_http=warn")),
        )
        .init();

    let config = Config::from_env()?;

    println!("🚀 Starting Survey Portal API server...");
    println!("📡 Server will run on http://localhost:{}", config.port);
    println!("🔗 CORS origin: {}", config.cors_origin);
    println!("🤖 AI service: {}", config.ai.base_url);

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers(Any);

    // Create the router with CORS
    let app = api::create_router(&config).await?.layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    println!("✅ Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
