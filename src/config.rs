use std::env;

use crate::constants::DEV_SECRET_KEY;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Key for signing session cookies
    pub secret_key: String,
    pub session_max_age_secs: i64,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/changeable.db".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key = match env::var("CHANGEABLE_SECRET") {
            Ok(key) if !key.is_empty() => key,
            _ if environment == "development" => {
                tracing::warn!("CHANGEABLE_SECRET not set, using development secret");
                DEV_SECRET_KEY.to_string()
            }
            _ => return Err("CHANGEABLE_SECRET must be set for session signing".to_string()),
        };

        let session_max_age_secs = env::var("SESSION_MAX_AGE_SECS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .map_err(|_| "Invalid SESSION_MAX_AGE_SECS")?;

        let log_requests = env::var("LOG_REQUESTS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| "Invalid LOG_REQUESTS")?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            environment,
            secret_key,
            session_max_age_secs,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
