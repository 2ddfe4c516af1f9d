//! Application configuration
//!
//! Loaded once from the environment (plus `.env` via dotenvy in `main`) into
//! an immutable snapshot behind a `OnceLock`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Global configuration snapshot, initialized on first access.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base used to assemble short links in create responses.
    pub base_url: String,
    /// Empty means any origin (without credentials).
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ShortenerConfig {
    pub default_validity_minutes: i64,
    pub code_length: usize,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_hours: i64,
}

/// The single identity the service authenticates. All fields come from the
/// environment; an empty access code disables login entirely.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub email: String,
    pub name: String,
    pub roll_no: String,
    pub access_code: String,
    pub client_id: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, log output goes to this file instead of stdout.
    pub file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory receiving the append-only audit line files.
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub shortener: ShortenerConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env_or("SERVER_HOST", "127.0.0.1");
        let port: u16 = env_parse_or("SERVER_PORT", 8080);
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("JWT_SECRET not configured, generating a random session secret");
                random_secret(32)
            });

        Self {
            server: ServerConfig {
                host,
                port,
                base_url,
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|raw| {
                        raw.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            shortener: ShortenerConfig {
                default_validity_minutes: env_parse_or("DEFAULT_VALIDITY_MINUTES", 30),
                code_length: env_parse_or("CODE_LENGTH", 6),
            },
            auth: AuthConfig {
                jwt_secret,
                token_hours: env_parse_or("TOKEN_HOURS", 24),
            },
            identity: IdentityConfig {
                email: env_or("USER_EMAIL", ""),
                name: env_or("USER_NAME", ""),
                roll_no: env_or("USER_ROLL_NO", ""),
                access_code: env_or("ACCESS_CODE", ""),
                client_id: env_or("CLIENT_ID", ""),
            },
            logging: LoggingConfig {
                level: env_or("LOG_LEVEL", "info"),
                file: env::var("LOG_FILE").ok().filter(|s| !s.is_empty()),
            },
            audit: AuditConfig {
                log_dir: PathBuf::from(env_or("AUDIT_LOG_DIR", "logs")),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn random_secret(bytes: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    std::iter::repeat_with(|| HEX[rand::random_range(0..HEX.len())] as char)
        .take(bytes * 2)
        .collect()
}
