pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod platform;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use platform::PlatformClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub platform: PlatformClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, platform::PlatformError> {
        let platform = PlatformClient::new(
            &config.platform_endpoint,
            &config.project_id,
            &config.api_key,
            std::time::Duration::from_secs(config.platform_timeout_secs),
        )?;
        Ok(Self {
            config: Arc::new(config),
            platform,
        })
    }
}
