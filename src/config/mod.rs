mod error;
mod paths;
mod settings;

pub use error::ConfigError;
pub use paths::{
    default_global_config_path, default_log_path, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
    SESSION_LOG_FILE,
};
pub use settings::{
    Settings, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, ENDPOINT_ENV_VAR,
};
