use library_inventory::{
    api::{handlers::AppState, router::create_router},
    application::Library,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_inventory=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::info!(?config, "Configuration loaded");

    // Session state lives for the lifetime of the process
    let library = if config.seed_catalog {
        Library::seeded(config.loan_period).expect("Failed to seed catalog")
    } else {
        Library::in_memory(config.loan_period)
    };
    tracing::info!(?library, "Library session initialized");

    let app_state = Arc::new(AppState::new(library));
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
