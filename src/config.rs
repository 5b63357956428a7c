//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing is written against a key lookup
//! function so the same code serves the real environment and test maps.

use std::net::SocketAddr;

/// Default SMTP relay host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default operator address receiving contact notifications.
pub const DEFAULT_CONTACT_EMAIL: &str = "info@greentrace.tech";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {value}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending raw value.
        value: String,
    },
}

/// Top-level server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8001`).
    pub listen_addr: SocketAddr,

    /// Document store settings.
    pub database: DatabaseConfig,

    /// Cross-origin allow-list.
    pub cors_origins: CorsOrigins,

    /// Outbound email settings.
    pub smtp: SmtpConfig,

    /// Log output format.
    pub log_format: LogFormat,
}

/// Document store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string. `memory://` selects the in-process store.
    pub url: String,

    /// Logical database name.
    pub name: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum idle connections in the pool.
    pub min_connections: u32,

    /// Timeout in seconds for acquiring a connection.
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Returns `true` when the URL selects the in-process memory store.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory://")
    }
}

/// SMTP relay settings for contact notifications.
#[derive(Clone, Default)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Login user, also used as the `From` address.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Address receiving contact notifications.
    pub recipient: String,
}

impl SmtpConfig {
    /// Returns `true` when both user and password are non-empty.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// An explicit list of origins.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parses a comma-separated origin list. A `*` entry means any origin.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `DATABASE_URL` or `DB_NAME` is missing, or
    /// `LISTEN_ADDR` is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8001".to_string());
        let listen_addr: SocketAddr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            value: raw_addr.clone(),
        })?;

        let database = DatabaseConfig {
            url: require(&lookup, "DATABASE_URL")?,
            name: require(&lookup, "DB_NAME")?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 1),
            connect_timeout_secs: parse_or(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 5),
        };

        let cors_origins = CorsOrigins::parse(&lookup("CORS_ORIGINS").unwrap_or_default());

        let smtp = SmtpConfig {
            host: lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: parse_or(&lookup, "SMTP_PORT", DEFAULT_SMTP_PORT),
            user: lookup("SMTP_USER").unwrap_or_default(),
            password: lookup("SMTP_PASSWORD").unwrap_or_default(),
            recipient: lookup("CONTACT_EMAIL").unwrap_or_else(|| DEFAULT_CONTACT_EMAIL.to_string()),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            database,
            cors_origins,
            smtp,
            log_format,
        })
    }
}

/// Returns a non-empty variable or [`ConfigError::Missing`].
fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
