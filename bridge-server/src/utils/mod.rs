//! Utility module - logging and environment bootstrap

pub mod logger;

use crate::core::Config;

/// Prepare the process environment: load `.env`, then initialize logging
/// with the configured directory (if any)
pub fn setup_environment(config: &Config) {
    logger::init_logger_with_file(None, config.log_dir.as_deref());
}

/// Load `.env` before reading configuration
pub fn load_dotenv() {
    // Missing .env files are fine; the environment wins either way
    let _ = dotenv::dotenv();
}
