use std::env;
use std::time::Duration;

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// How often the server pings each connection. A failed ping write
    /// is fatal to that connection.
    pub ping_interval: Duration,
    /// Reap connections with no inbound frames for this long. Off by
    /// default: a silent but writable client is left alone.
    pub idle_timeout: Option<Duration>,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("FLARE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            ping_interval: env::var("FLARE_PING_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ping_interval),
            idle_timeout: env::var("FLARE_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .or(defaults.idle_timeout),
            jwt_secret: env::var("FLARE_JWT_SECRET").unwrap_or(defaults.jwt_secret),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            ping_interval: DEFAULT_PING_INTERVAL,
            idle_timeout: None,
            jwt_secret: "flare-dev-secret".to_string(),
        }
    }
}
