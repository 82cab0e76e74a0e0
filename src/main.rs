use dotenvy::dotenv;
use restaurant_products::{
    api::{self, AppState},
    config,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Server settings from config.toml (defaults when absent)
    let app_config = config::server::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Database connection and tables
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve
    let address = app_config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(address.as_str()).await?;
    info!("Listening on {}", address);
    axum::serve(listener, api::router(AppState::new(db))).await?;

    Ok(())
}
