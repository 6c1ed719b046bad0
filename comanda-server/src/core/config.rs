//! Server configuration
//!
//! Every knob can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development / staging / production |
//! | JWT_SECRET | comanda-dev-secret | HS256 signing secret |
//! | JWT_TTL_HOURS | 12 | token lifetime |
//! | TAX_RATE_PERCENT | 10.0 | fixed bill tax rate |
//! | RESTAURANT_ID | default | restaurant this instance serves |
//! | FEED_CAPACITY | 1024 | change feed channel capacity |
//! | DEFAULT_ADMIN_PASSWORD | admin | seeded admin password (dev only) |
//! | LOG_DIR | (unset) | daily log file directory |

use crate::auth::JwtConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT auth configuration
    pub jwt: JwtConfig,
    /// Fixed tax rate applied when composing bills, percent of subtotal
    pub tax_rate_percent: f64,
    /// Restaurant this edge instance serves; scopes seeded accounts
    pub restaurant_id: String,
    /// Capacity of each change feed broadcast channel
    pub feed_capacity: usize,
    /// Password given to the seeded admin account when the store is empty
    pub default_admin_password: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::from_env(),
            tax_rate_percent: std::env::var("TAX_RATE_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10.0),
            restaurant_id: std::env::var("RESTAURANT_ID").unwrap_or_else(|_| "default".into()),
            feed_capacity: std::env::var("FEED_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            default_admin_password: std::env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
