#![allow(dead_code)]

pub mod fake_driver;
pub mod sites;

use std::time::Duration;

use ui_scenarios::cli::config::AppConfig;

pub const SHORT: Duration = Duration::from_millis(50);
pub const POLL: Duration = Duration::from_millis(5);

/// Defaults with waits cut down for the in-memory driver.
pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.timeouts.default_wait_secs = 1;
    config.timeouts.cookie_wait_secs = 0;
    config.timeouts.poll_interval_ms = 5;
    config.timeouts.settle_ms = 0;
    config.calendar.read_attempts = 3;
    config.calendar.read_backoff_ms = 0;
    config
}
