use skillshare_hub_backend::error::AppError;
use skillshare_hub_backend::run_server;
use skillshare_hub_config::get_config;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info,skillshare_hub_backend=debug,skillshare_hub_database=debug,\
                                 hyper=info";

// RUST_LOG=debug cargo run --bin server
#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
        )
        .init();

    let config = get_config()?;
    run_server(config).await
}
