use axum::http::Method;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

mod config;

use config::Config;
use csms_api::AppState;
use csms_drive::DriveClient;
use csms_notify::{Mailer, ResendMailer};
use csms_storage::RecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    println!("🚀 Starting CSMS backend...");
    println!("📡 Server will run on http://localhost:{}", config.port);
    println!("🔗 CORS origin: {}", config.cors_origin);
    println!("🗂  Record store: {:?}", config.data_dir);

    let store = Arc::new(RecordStore::new(config.data_dir.clone()));
    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(config.notify)?);
    let drive = Arc::new(DriveClient::new(config.drive)?);
    let state = AppState::new(store, mailer, drive, config.reminders);

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Create the router with CORS
    let app = csms_api::create_router(state).layer(cors);

    // Create socket address
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    println!("✅ Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
