use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// API key for api.weatherapi.com
pub static WEATHER_TOKEN: Lazy<String> = Lazy::new(|| env::var("WEATHER_TOKEN").unwrap_or_else(|_| String::new()));

/// Personal access token for the GitHub API
/// May be empty: unauthenticated requests work with a lower rate limit
pub static GITHUB_TOKEN: Lazy<String> = Lazy::new(|| env::var("GITHUB_TOKEN").unwrap_or_else(|_| String::new()));

/// Authorization token for api.ukrainealarm.com
pub static ALERT_API_TOKEN: Lazy<String> =
    Lazy::new(|| env::var("ALARM_API_TOKEN").unwrap_or_else(|_| String::new()));

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: bot_data.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "bot_data.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// File the last fetched region tree is persisted to
/// Overwritten wholesale on every successful refresh; the wizard matches
/// against this snapshot, not against the network
pub static REGIONS_SNAPSHOT_PATH: Lazy<String> =
    Lazy::new(|| env::var("REGIONS_SNAPSHOT_PATH").unwrap_or_else(|_| "data.json".to_string()));

/// File the last raw alert feed response is persisted to (audit/replay)
pub static ALERTS_SNAPSHOT_PATH: Lazy<String> =
    Lazy::new(|| env::var("ALERTS_SNAPSHOT_PATH").unwrap_or_else(|_| "data_alert.json".to_string()));

/// External API endpoints, overridable for local testing
pub mod api {
    use super::{env, Lazy};

    /// Base URL of the alert/region API
    pub static ALERT_API_BASE: Lazy<String> = Lazy::new(|| {
        env::var("ALERT_API_BASE").unwrap_or_else(|_| "https://api.ukrainealarm.com/api/v3".to_string())
    });

    /// Base URL of the weather API
    pub static WEATHER_API_BASE: Lazy<String> =
        Lazy::new(|| env::var("WEATHER_API_BASE").unwrap_or_else(|_| "https://api.weatherapi.com/v1".to_string()));

    /// Base URL of the GitHub API
    pub static GITHUB_API_BASE: Lazy<String> =
        Lazy::new(|| env::var("GITHUB_API_BASE").unwrap_or_else(|_| "https://api.github.com".to_string()));
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout applied to every outbound HTTP request (in seconds).
    /// All the APIs we talk to answer well under this; a hung upstream
    /// must not stall a user's dialogue forever.
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Outbound request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Region selection wizard configuration
pub mod wizard {
    /// How many times a malformed city entry (a "city" that still has
    /// children in the upstream tree) is re-prompted before the wizard
    /// binds it anyway and terminates.
    pub const MAX_CITY_REPROMPTS: u8 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_timeout_is_bounded() {
        let t = network::timeout();
        assert!(t.as_secs() > 0);
        assert!(t.as_secs() <= 60);
    }

    #[test]
    fn test_default_snapshot_paths_differ() {
        assert_ne!(*REGIONS_SNAPSHOT_PATH, *ALERTS_SNAPSHOT_PATH);
    }
}
