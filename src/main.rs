use restaurant_service::runtime::{setup_tracing, AppConfig, RestaurantApp};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    setup_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error");
            std::process::exit(1);
        }
    };
    info!(store_mode = ?config.store_mode, address = %config.bind_address(), "Starting restaurant service");

    let app = match RestaurantApp::new(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Startup failed");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.serve().await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
