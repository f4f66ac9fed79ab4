use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ivf_algo::DEFAULT_MAX_ATTEMPTS;

/// Upper bound for `ESTIMATE_MAX_ATTEMPTS`
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Number of attempts projected per estimate
    pub max_attempts: u32,
    pub app_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            log_level: "info".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            app_version: "unknown".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(defaults.host);

        let log_level = std::env::var("RUST_LOG").unwrap_or(defaults.log_level);

        let max_attempts = std::env::var("ESTIMATE_MAX_ATTEMPTS")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .map(|value| value.clamp(1, MAX_ATTEMPTS_LIMIT))
            .unwrap_or(defaults.max_attempts);

        let app_version = std::env::var("APP_VERSION")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.app_version);

        Self {
            host,
            port,
            log_level,
            max_attempts,
            app_version,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
    }
}
