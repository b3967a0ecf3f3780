//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads a `.env` file with `dotenvy` first, so a local
//! `.env` behaves exactly like exported variables. A variable set to the
//! empty string counts as unset.
//!
//! | Variable               | Default                 |
//! |------------------------|-------------------------|
//! | `ENV`                  | `dev`                   |
//! | `HOST`                 | `0.0.0.0`               |
//! | `PORT`                 | `4206`                  |
//! | `DB_PATH`              | required                |
//! | `CORS_ORIGIN`          | `http://localhost:5173` |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    |
//! | `BODY_LIMIT_BYTES`     | `2097152`               |

use std::env;

use axum::http::HeaderValue;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Deployment environment name (`dev`, `localhost`, `prod`, ...)
    pub env: String,

    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// SQLite database file
    pub db_path: String,

    /// Allowed CORS origins, already validated as header values
    pub cors_origins: Vec<HeaderValue>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes (default: 2MB)
    pub body_limit_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `load` passes the process environment; tests pass a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let var = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let db_path = get("DB_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DB_PATH".to_string()))?;

        let config = ApiConfig {
            env: var("ENV", "dev").trim().to_lowercase(),
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "4206")
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
            db_path,
            cors_origins: parse_origins(&var("CORS_ORIGIN", DEFAULT_CORS_ORIGIN))?,
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS", "30")
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
            body_limit_bytes: var("BODY_LIMIT_BYTES", "2097152") // 2MB
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BODY_LIMIT_BYTES".to_string()))?,
        };

        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()));
        }
        if config.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue("BODY_LIMIT_BYTES".to_string()));
        }

        Ok(config)
    }

    /// Development environments get human-readable logs.
    pub fn is_dev(&self) -> bool {
        matches!(self.env.as_str(), "dev" | "localhost")
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Splits the comma-separated origin list, skipping blank entries.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            // tower-http only accepts `*` as the sole origin, never in a list
            if o == "*" {
                return Err(ConfigError::InvalidValue("CORS_ORIGIN".to_string()));
            }
            HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidValue("CORS_ORIGIN".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::InvalidValue("CORS_ORIGIN".to_string()));
    }

    Ok(origins)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[("DB_PATH", "./stitchbook.db")]).unwrap();

        assert_eq!(config.env, "dev");
        assert!(config.is_dev());
        assert_eq!(config.bind_addr(), "0.0.0.0:4206");
        assert_eq!(config.db_path, "./stitchbook.db");
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.body_limit_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_db_path_is_required() {
        let err = load_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref v) if v == "DB_PATH"));

        let err = load_from(&[("DB_PATH", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = load_from(&[("DB_PATH", "x.db"), ("PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "PORT"));
        assert_eq!(err.to_string(), "Invalid value for PORT");
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = load_from(&[("DB_PATH", "x.db"), ("REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "REQUEST_TIMEOUT_SECS"));

        let err = load_from(&[("DB_PATH", "x.db"), ("BODY_LIMIT_BYTES", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "BODY_LIMIT_BYTES"));
    }

    #[test]
    fn test_cors_origin_list() {
        let config = load_from(&[
            ("DB_PATH", "x.db"),
            ("CORS_ORIGIN", "https://app.example.com, http://localhost:3000,"),
        ])
        .unwrap();

        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://localhost:3000");

        let err = load_from(&[("DB_PATH", "x.db"), ("CORS_ORIGIN", " , ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "CORS_ORIGIN"));

        let err = load_from(&[("DB_PATH", "x.db"), ("CORS_ORIGIN", "*")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "CORS_ORIGIN"));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = load_from(&[
            ("DB_PATH", "x.db"),
            ("ENV", ""),
            ("PORT", ""),
            ("CORS_ORIGIN", ""),
            ("REQUEST_TIMEOUT_SECS", ""),
        ])
        .unwrap();

        assert_eq!(config.env, "dev");
        assert_eq!(config.port, 4206);
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)]);
        assert_eq!(config.request_timeout_secs, 30);

        let err = load_from(&[("DB_PATH", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref v) if v == "DB_PATH"));
    }

    #[test]
    fn test_production_env() {
        let config = load_from(&[("DB_PATH", "x.db"), ("ENV", "Production")]).unwrap();
        assert_eq!(config.env, "production");
        assert!(!config.is_dev());
    }
}
