use tracing::info;
use wardplane::{
    api::{start_api_server, ApiState},
    config::AppConfig,
    observability::init_tracing,
    storage::create_pool,
    Result, APP_NAME, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; config is read from the environment below.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    init_tracing()?;

    info!(app_name = APP_NAME, version = VERSION, "Starting Wardplane control plane");

    let config = AppConfig::from_env()?;
    info!(
        api_host = %config.server.host,
        api_port = config.server.port,
        auto_migrate = config.database.auto_migrate,
        "Loaded configuration from environment"
    );

    let pool = create_pool(&config.database).await?;

    let state = ApiState::new(pool, config.auth.worker_shared_secret.clone());
    start_api_server(config.server, state).await
}
