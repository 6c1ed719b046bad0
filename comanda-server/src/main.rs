//! comanda-server entry point

use comanda_server::core::{Config, ServerState, run};
use comanda_server::utils::init_logger_with_file;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(None, config.log_dir.as_deref());

    info!(
        environment = %config.environment,
        restaurant_id = %config.restaurant_id,
        port = config.http_port,
        "Starting comanda-server"
    );

    let state = ServerState::initialize(config)?;
    run(state).await
}
