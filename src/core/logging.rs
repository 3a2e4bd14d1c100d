//! Logging initialization (console + file)

use anyhow::Result;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs which secrets are configured at startup, without printing them.
pub fn log_token_configuration() {
    use crate::core::config;

    let check = |name: &str, value: &str| {
        if value.is_empty() {
            log::warn!("{}: not set", name);
        } else {
            log::info!("{}: configured", name);
        }
    };

    check("BOT_TOKEN", &config::BOT_TOKEN);
    check("WEATHER_TOKEN", &config::WEATHER_TOKEN);
    check("GITHUB_TOKEN", &config::GITHUB_TOKEN);
    check("ALARM_API_TOKEN", &config::ALERT_API_TOKEN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        // The global logger installs once per process, so the init result
        // depends on test order; the log file is created before that step
        // and must exist either way.
        let _ = init_logger(path.to_str().unwrap());
        assert!(path.exists());
    }
}
