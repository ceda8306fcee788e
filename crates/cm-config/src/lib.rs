mod auth_config;
mod backend_config;
mod config;
mod error;
mod intent_store_config;
mod log_level;
mod logging_config;
mod retry_config;

pub use auth_config::AuthConfig;
pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use intent_store_config::IntentStoreConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_INTENT_FILENAME: &str = "pending_role_intents.json";
const DEFAULT_APP_DIR: &str = "campus-market";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
