//! Command line and environment configuration.

use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::map::TileSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Admin,
    Citizen,
}

/// Civic - terminal client for the issue reporting portal
#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(about = "Terminal client for the civic issue reporting portal")]
pub struct Cli {
    /// Portal backend URL
    #[arg(short, long, env = "CIVIC_SERVER_URL", default_value = "http://localhost:8000")]
    pub server: String,

    /// Bearer token for the portal API
    #[arg(long, env = "CIVIC_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Reverse geocoding endpoint (Nominatim compatible)
    #[arg(long, env = "CIVIC_GEOCODER_URL", default_value = "https://nominatim.openstreetmap.org")]
    pub geocoder: String,

    /// Which dashboard to open
    #[arg(long, value_enum, default_value_t = Role::Citizen)]
    pub role: Role,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Log filter directives (tracing `EnvFilter` syntax)
    #[arg(long, env = "CIVIC_LOG", default_value = crate::logging::DEFAULT_FILTER)]
    pub log: String,
}

/// Settings injected into the app at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub token: Option<String>,
    pub geocoder_url: String,
    pub role: Role,
    pub timeout: Duration,
    pub tiles: TileSource,
    pub log_filter: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            server_url: cli.server,
            token: cli.token.filter(|t| !t.trim().is_empty()),
            geocoder_url: cli.geocoder,
            role: cli.role,
            timeout: Duration::from_secs(cli.timeout.max(1)),
            tiles: TileSource::default(),
            log_filter: cli.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_with_token() {
        let cli = Cli::try_parse_from([
            "civic",
            "--server",
            "http://portal.test",
            "--token",
            "abc",
            "--role",
            "admin",
        ])
        .unwrap();
        let config = Config::from(cli);
        assert_eq!(config.server_url, "http://portal.test");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.role, Role::Admin);
        assert_eq!(config.tiles.max_zoom, 19);
        assert_eq!(config.log_filter, crate::logging::DEFAULT_FILTER);
    }

    #[test]
    fn test_blank_token_is_no_token() {
        let cli = Cli::try_parse_from(["civic", "--token", " ", "--timeout", "0"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
