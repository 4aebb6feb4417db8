use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Development-only signing secret; production deployments must override it.
const DEV_SECRET: &str = "wardrobe-ai-development-secret";

/// One year, matching the lifetime of uploaded image links.
const DEFAULT_SIGNED_URL_TTL_SECS: i64 = 60 * 60 * 24 * 365;

/// 5 MiB upload ceiling for image objects.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5_242_880;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub outfits: OutfitConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let auth = AuthConfig {
            token_secret: secret_var("AUTH_TOKEN_SECRET", environment)?,
            token_ttl_minutes: parse_var("AUTH_TOKEN_TTL_MINUTES", 60)?,
        };

        let storage = StorageConfig {
            signing_secret: secret_var("STORAGE_SIGNING_SECRET", environment)?,
            public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}")),
            signed_url_ttl_secs: parse_var(
                "STORAGE_SIGNED_URL_TTL_SECS",
                DEFAULT_SIGNED_URL_TTL_SECS,
            )?,
            max_upload_bytes: parse_var("STORAGE_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        let outfits = OutfitConfig {
            jitter: JitterMode::from_env()?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            auth,
            storage,
            outfits,
        })
    }
}

fn secret_var(name: &'static str, environment: AppEnvironment) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ if environment == AppEnvironment::Production => Err(ConfigError::MissingSecret(name)),
        _ => Ok(DEV_SECRET.to_string()),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Access token signing for the local identity provider.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_minutes: i64,
}

/// Image object storage and signed link settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub signing_secret: String,
    pub public_base_url: String,
    pub signed_url_ttl_secs: i64,
    pub max_upload_bytes: usize,
}

/// Outfit generation controls.
#[derive(Debug, Clone)]
pub struct OutfitConfig {
    pub jitter: JitterMode,
}

/// Source of the tie-break jitter added to every candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterMode {
    Random,
    Seeded(u64),
    Off,
}

impl JitterMode {
    fn from_env() -> Result<Self, ConfigError> {
        if let Ok(raw) = env::var("OUTFIT_JITTER_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "OUTFIT_JITTER_SEED",
                    value: raw.clone(),
                })?;
            return Ok(Self::Seeded(seed));
        }

        match env::var("OUTFIT_JITTER")
            .unwrap_or_else(|_| "random".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "random" | "on" => Ok(Self::Random),
            "off" | "none" => Ok(Self::Off),
            other => Err(ConfigError::InvalidJitterMode(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    MissingSecret(&'static str),
    InvalidJitterMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a valid number (got '{value}')")
            }
            ConfigError::MissingSecret(name) => {
                write!(f, "{name} must be set when APP_ENV is production")
            }
            ConfigError::InvalidJitterMode(value) => {
                write!(f, "OUTFIT_JITTER must be 'random' or 'off' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::MissingSecret(_)
            | ConfigError::InvalidJitterMode(_) => None,
        }
    }
}
