//! Application configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | RETAIL_DATA_DIR | ./retail-data | Store location |
//! | RETAIL_LOG_DIR | (unset) | Log file directory; console-only when unset |
//! | LOG_LEVEL | info | Default log level (RUST_LOG overrides) |

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the embedded store files
    pub data_dir: String,
    /// Log file directory; logs go to the console only when unset
    pub log_dir: Option<String>,
    /// Default log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("RETAIL_DATA_DIR").unwrap_or_else(|_| "./retail-data".into()),
            log_dir: std::env::var("RETAIL_LOG_DIR").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
