//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{ApiDriver, DriverError, LockDriver};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API driver.
    pub driver: ApiDriver,
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
    /// GitHub API personal token.
    pub token: String,
    /// GitHub OAuth application client ID.
    pub client_id: String,
    /// GitHub OAuth application client secret.
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Lock driver.
    pub driver: LockDriver,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Server webhook secret.
    pub webhook_secret: String,
    /// Webhook callback endpoint URL, used on hook registration.
    pub webhook_endpoint: String,
    /// Disable webhook signature verification.
    pub disable_webhook_signature: bool,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Full sync schedule interval (in seconds).
    pub interval_seconds: u64,
    /// Rate limit safety threshold: a sync cycle is deferred when the
    /// remaining quota falls below this value.
    pub rate_limit_threshold: u64,
}

#[derive(Debug, Clone)]
pub struct TeamsConfig {
    /// Team allow-list: only these team names are mirrored.
    pub allow_list: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UsersConfig {
    /// Logins excluded from aggregate reporting by the display layer.
    pub ignore_list: Vec<String>,
}

/// Mirror configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub organization name.
    pub organization: String,
    /// API options.
    pub api: ApiConfig,
    /// Lock options.
    pub lock: LockConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Full sync options.
    pub sync: SyncConfig,
    /// Team options.
    pub teams: TeamsConfig,
    /// User options.
    pub users: UsersConfig,
    /// Test debug mode.
    pub test_debug_mode: bool,
    /// App version.
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Config {
        Config {
            organization: env_to_str("HUBSYNC_ORGANIZATION", ""),
            api: ApiConfig {
                driver: ApiDriver::from_str(&env_to_str("HUBSYNC_API_DRIVER", "github")).unwrap(),
                github: ApiGitHubConfig {
                    connect_timeout: env_to_u64("HUBSYNC_API_GITHUB_CONNECT_TIMEOUT", 5000),
                    root_url: env_to_str("HUBSYNC_API_GITHUB_ROOT_URL", "https://api.github.com"),
                    token: env_to_str("HUBSYNC_API_GITHUB_TOKEN", ""),
                    client_id: env_to_str("HUBSYNC_API_GITHUB_CLIENT_ID", ""),
                    client_secret: env_to_str("HUBSYNC_API_GITHUB_CLIENT_SECRET", ""),
                },
            },
            lock: LockConfig {
                driver: LockDriver::from_str(&env_to_str("HUBSYNC_LOCK_DRIVER", "local")).unwrap(),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("HUBSYNC_LOGGING_USE_BUNYAN", false),
            },
            server: ServerConfig {
                bind_ip: env_to_str("HUBSYNC_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("HUBSYNC_SERVER_BIND_PORT", 8008),
                workers_count: env_to_optional_u16("HUBSYNC_SERVER_WORKERS_COUNT", None),
                webhook_secret: env_to_str("HUBSYNC_SERVER_WEBHOOK_SECRET", ""),
                webhook_endpoint: env_to_str("HUBSYNC_SERVER_WEBHOOK_ENDPOINT", ""),
                disable_webhook_signature: env_to_bool(
                    "HUBSYNC_SERVER_DISABLE_WEBHOOK_SIGNATURE",
                    false,
                ),
            },
            sync: SyncConfig {
                interval_seconds: env_to_u64("HUBSYNC_SYNC_INTERVAL_SECONDS", 3600),
                rate_limit_threshold: env_to_u64("HUBSYNC_SYNC_RATE_LIMIT_THRESHOLD", 500),
            },
            teams: TeamsConfig {
                allow_list: env_to_str_list("HUBSYNC_TEAMS_ALLOW_LIST"),
            },
            users: UsersConfig {
                ignore_list: env_to_str_list("HUBSYNC_USERS_IGNORE_LIST"),
            },
            test_debug_mode: env_to_bool("HUBSYNC_TEST_DEBUG_MODE", false),
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}

fn env_to_str_list(name: &str) -> Vec<String> {
    env::var(name)
        .map(|e| {
            e.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
