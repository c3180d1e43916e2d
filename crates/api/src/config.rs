/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum pool size (default: `20`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `8080`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `DATABASE_URL`         | (required) |
    /// | `DB_MAX_CONNECTIONS`   | `20`       |
    ///
    /// Panics on a missing `DATABASE_URL` or an unparsable number so that
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            request_timeout_secs,
            database_url,
            db_max_connections,
        }
    }
}
